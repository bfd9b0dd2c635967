//! Cold-start remote config resolution.
//!
//! At most once per cool-down window the resolver asks the remote endpoint
//! where the app should start. Anything short of a success carrying a valid
//! http(s) destination falls back to local state, through
//! [`FALLBACK_CHAIN`] in order.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use super::fetcher::{ConfigFetcher, HttpFetcher};
use super::state::ConfigFetchState;
use crate::clock::Clock;
use crate::storage::{RemoteConfig, Store};

/// Where the app should start.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Resolution {
    ShowOnboarding,
    Redirect { destination: String },
    ProceedToApp,
}

/// What produced a [`Resolution`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionSource {
    /// A fresh fetch in this launch.
    Remote,
    /// A destination cached by an earlier fetch.
    Cache,
    /// Local onboarding state only.
    Local,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverOutcome {
    pub resolution: Resolution,
    pub source: ResolutionSource,
    /// Whether a network call was attempted.
    pub fetched: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolverSettings {
    pub activation_timestamp: i64,
    pub cooldown_secs: i64,
    pub timeout: Duration,
}

impl ResolverSettings {
    pub fn from_config(config: &RemoteConfig) -> Self {
        Self {
            activation_timestamp: config.activation_timestamp,
            cooldown_secs: config.cooldown_secs,
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    /// Fetch only after activation and once the cool-down has elapsed.
    pub fn should_fetch(&self, now: i64, last_fetch: i64) -> bool {
        now >= self.activation_timestamp && now.saturating_sub(last_fetch) > self.cooldown_secs
    }
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self::from_config(&RemoteConfig::default())
    }
}

/// One step of the fallback chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackStrategy {
    CachedRedirect,
    LocalOnboarding,
    ProceedToApp,
}

pub const FALLBACK_CHAIN: [FallbackStrategy; 3] = [
    FallbackStrategy::CachedRedirect,
    FallbackStrategy::LocalOnboarding,
    FallbackStrategy::ProceedToApp,
];

impl FallbackStrategy {
    /// A decision, or `None` to defer to the next strategy.
    pub fn decide(self, state: &ConfigFetchState) -> Option<Resolution> {
        match self {
            FallbackStrategy::CachedRedirect => {
                state.cached_redirect().map(|url| Resolution::Redirect {
                    destination: url.to_string(),
                })
            }
            FallbackStrategy::LocalOnboarding => {
                (!state.onboarding_completed).then_some(Resolution::ShowOnboarding)
            }
            FallbackStrategy::ProceedToApp => Some(Resolution::ProceedToApp),
        }
    }

    fn source(self) -> ResolutionSource {
        match self {
            FallbackStrategy::CachedRedirect => ResolutionSource::Cache,
            FallbackStrategy::LocalOnboarding | FallbackStrategy::ProceedToApp => {
                ResolutionSource::Local
            }
        }
    }
}

/// Run [`FALLBACK_CHAIN`] against `state`.
pub fn fallback(state: &ConfigFetchState) -> (FallbackStrategy, Resolution) {
    FALLBACK_CHAIN
        .iter()
        .find_map(|strategy| strategy.decide(state).map(|r| (*strategy, r)))
        .unwrap_or((FallbackStrategy::ProceedToApp, Resolution::ProceedToApp))
}

pub struct RemoteConfigResolver {
    store: Store,
    clock: Arc<dyn Clock>,
    fetcher: Option<Arc<dyn ConfigFetcher>>,
    settings: ResolverSettings,
}

impl RemoteConfigResolver {
    /// A resolver with no endpoint; it always falls back.
    pub fn new(store: Store, clock: Arc<dyn Clock>, settings: ResolverSettings) -> Self {
        Self {
            store,
            clock,
            fetcher: None,
            settings,
        }
    }

    pub fn with_fetcher(mut self, fetcher: Arc<dyn ConfigFetcher>) -> Self {
        self.fetcher = Some(fetcher);
        self
    }

    /// Build from the `[remote]` config section, with an HTTP fetcher when an
    /// endpoint is set. An endpoint that is not a URL is logged and ignored,
    /// so launches still resolve from local state.
    pub fn from_config(store: Store, clock: Arc<dyn Clock>, config: &RemoteConfig) -> Self {
        let settings = ResolverSettings::from_config(config);
        let resolver = Self::new(store, clock, settings);
        let Some(endpoint) = config.endpoint.as_deref().filter(|e| !e.trim().is_empty()) else {
            return resolver;
        };
        match HttpFetcher::new(endpoint, settings.timeout) {
            Ok(fetcher) => resolver.with_fetcher(Arc::new(fetcher)),
            Err(e) => {
                tracing::warn!(endpoint, error = %e, "ignoring invalid remote config endpoint");
                resolver
            }
        }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    pub fn settings(&self) -> ResolverSettings {
        self.settings
    }

    /// Decide where this launch starts. Never fails.
    pub async fn resolve(&self) -> ResolverOutcome {
        let state = ConfigFetchState::load(&self.store);
        let now = self.clock.unix_now();

        let mut fetched = false;
        if let Some(fetcher) = &self.fetcher {
            if self.settings.should_fetch(now, state.last_fetch_timestamp) {
                fetched = true;
                if let Some(url) = self.fetch_destination(fetcher.as_ref(), now).await {
                    if let Err(e) = ConfigFetchState::store_remote(&self.store, &url) {
                        tracing::warn!(error = %e, "failed to cache remote destination");
                    }
                    tracing::info!(destination = %url, "remote config resolved to redirect");
                    return ResolverOutcome {
                        resolution: Resolution::Redirect {
                            destination: url.to_string(),
                        },
                        source: ResolutionSource::Remote,
                        fetched,
                    };
                }
            } else {
                tracing::debug!(
                    now,
                    last_fetch = state.last_fetch_timestamp,
                    "remote config fetch not due"
                );
            }
        }

        let (strategy, resolution) = fallback(&state);
        if strategy == FallbackStrategy::LocalOnboarding {
            if let Err(e) = ConfigFetchState::store_local_onboarding(&self.store) {
                tracing::warn!(error = %e, "failed to persist onboarding fallback");
            }
        }
        tracing::info!(?strategy, ?resolution, "remote config fell back");
        ResolverOutcome {
            resolution,
            source: strategy.source(),
            fetched,
        }
    }

    async fn fetch_destination(&self, fetcher: &dyn ConfigFetcher, now: i64) -> Option<Url> {
        let result = tokio::time::timeout(self.settings.timeout, fetcher.fetch()).await;

        if let Err(e) = ConfigFetchState::record_attempt(&self.store, now) {
            tracing::warn!(error = %e, "failed to record fetch time");
        }

        let response = match result {
            Ok(Ok(response)) => response,
            Ok(Err(e)) => {
                tracing::info!(error = %e, "remote config fetch failed");
                return None;
            }
            Err(_) => {
                tracing::info!(
                    timeout_ms = self.settings.timeout.as_millis() as u64,
                    "remote config fetch timed out"
                );
                return None;
            }
        };

        let destination = response.valid_destination();
        if destination.is_none() {
            tracing::info!(
                success = response.success,
                destination = %response.destination,
                "remote config carried no usable destination"
            );
        }
        destination
    }
}
