use serde::{Deserialize, Serialize};
use url::Url;

use super::response::validate_destination;
use crate::error::StoreError;
use crate::storage::{keys, Store};

/// Launch-gate values persisted between runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigFetchState {
    /// Unix seconds of the last fetch attempt; 0 means never.
    pub last_fetch_timestamp: i64,
    pub cached_destination: String,
    pub cached_config_loaded: bool,
    pub cached_show_onboarding: bool,
    pub onboarding_completed: bool,
}

impl ConfigFetchState {
    /// Read every field from `store`. A loaded flag whose destination does
    /// not validate is read back as not loaded.
    pub fn load(store: &Store) -> Self {
        let mut state = Self {
            last_fetch_timestamp: store.timestamp(keys::LAST_CONFIG_FETCH_TIME),
            cached_destination: store.string(keys::CACHED_START_INFO),
            cached_config_loaded: store.flag(keys::CACHED_CONFIG_LOADED),
            cached_show_onboarding: store.flag(keys::CACHED_SHOW_ONBOARDING),
            onboarding_completed: store.flag(keys::IS_ONBOARDING_COMPLETED),
        };
        if state.cached_config_loaded && validate_destination(&state.cached_destination).is_none()
        {
            tracing::warn!(
                destination = %state.cached_destination,
                "cached destination is not a valid URL, ignoring it"
            );
            state.cached_config_loaded = false;
        }
        state
    }

    /// The cached redirect, if one is loaded.
    pub fn cached_redirect(&self) -> Option<Url> {
        if !self.cached_config_loaded {
            return None;
        }
        validate_destination(&self.cached_destination)
    }

    pub(crate) fn record_attempt(store: &Store, now: i64) -> Result<(), StoreError> {
        store.set(keys::LAST_CONFIG_FETCH_TIME, &now)
    }

    pub(crate) fn store_remote(store: &Store, destination: &Url) -> Result<(), StoreError> {
        store.set(keys::CACHED_SHOW_ONBOARDING, &false)?;
        store.set(keys::CACHED_START_INFO, destination.as_str())?;
        store.set(keys::CACHED_CONFIG_LOADED, &true)
    }

    pub(crate) fn store_local_onboarding(store: &Store) -> Result<(), StoreError> {
        store.set(keys::CACHED_SHOW_ONBOARDING, &true)?;
        store.set(keys::CACHED_START_INFO, "")?;
        store.set(keys::CACHED_CONFIG_LOADED, &false)
    }

    pub(crate) fn store_onboarding_completed(store: &Store) -> Result<(), StoreError> {
        store.set(keys::IS_ONBOARDING_COMPLETED, &true)?;
        store.set(keys::CACHED_SHOW_ONBOARDING, &false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_store_loads_defaults() {
        let state = ConfigFetchState::load(&Store::in_memory());
        assert_eq!(state, ConfigFetchState::default());
        assert!(state.cached_redirect().is_none());
    }

    #[test]
    fn remote_values_round_trip() {
        let store = Store::in_memory();
        let url = Url::parse("https://example.com/start").unwrap();
        ConfigFetchState::store_remote(&store, &url).unwrap();
        ConfigFetchState::record_attempt(&store, 1_750_000_000).unwrap();

        let state = ConfigFetchState::load(&store);
        assert!(state.cached_config_loaded);
        assert!(!state.cached_show_onboarding);
        assert_eq!(state.last_fetch_timestamp, 1_750_000_000);
        assert_eq!(state.cached_redirect(), Some(url));
    }

    #[test]
    fn invalid_cached_destination_is_downgraded() {
        let store = Store::in_memory();
        store.set(keys::CACHED_CONFIG_LOADED, &true).unwrap();
        store.set(keys::CACHED_START_INFO, "not a url").unwrap();

        let state = ConfigFetchState::load(&store);
        assert!(!state.cached_config_loaded);
        assert!(state.cached_redirect().is_none());
    }

    #[test]
    fn completing_onboarding_clears_show_flag() {
        let store = Store::in_memory();
        ConfigFetchState::store_local_onboarding(&store).unwrap();
        assert!(ConfigFetchState::load(&store).cached_show_onboarding);

        ConfigFetchState::store_onboarding_completed(&store).unwrap();
        let state = ConfigFetchState::load(&store);
        assert!(state.onboarding_completed);
        assert!(!state.cached_show_onboarding);
    }
}
