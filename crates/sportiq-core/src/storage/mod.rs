//! Persistent storage: the typed key-value [`Store`], its backends and the
//! TOML configuration file.

mod config;
pub mod database;
pub mod keys;
mod memory;

pub use config::{Config, LoggingConfig, QuizConfig, RemoteConfig};
pub use database::SqliteBackend;
pub use memory::MemoryBackend;

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{ConfigError, StoreError};

/// Returns `~/.config/sportiq[-dev]/` based on SPORTIQ_ENV.
///
/// Set SPORTIQ_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("SPORTIQ_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("sportiq-dev")
    } else {
        base_dir.join("sportiq")
    };

    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::DataDir(e.to_string()))?;
    Ok(dir)
}

/// Raw string storage underneath a [`Store`].
///
/// Implementations must serialize concurrent writers so no write is lost.
pub trait KvBackend: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Typed, JSON-encoded key-value store shared by every engine.
///
/// Cloning is cheap; clones talk to the same backend.
#[derive(Clone)]
pub struct Store {
    backend: Arc<dyn KvBackend>,
}

impl fmt::Debug for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store").finish_non_exhaustive()
    }
}

impl Store {
    pub fn new(backend: impl KvBackend + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    /// Open the SQLite store at `<data_dir>/sportiq.db`.
    ///
    /// # Errors
    /// Returns an error if the data directory or database cannot be opened.
    pub fn open() -> crate::error::Result<Self> {
        let path = data_dir()?.join("sportiq.db");
        Ok(Self::new(SqliteBackend::open(path)?))
    }

    /// A volatile store, lost when dropped.
    pub fn in_memory() -> Self {
        Self::new(MemoryBackend::default())
    }

    /// Serialize `value` as JSON and write it under `key`, replacing any
    /// previous value.
    ///
    /// # Errors
    /// Serialization failures and backend failures are both returned.
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let json = serde_json::to_string(value).map_err(|source| StoreError::Serialize {
            key: key.to_string(),
            source,
        })?;
        self.backend.set(key, &json)
    }

    /// Read the value under `key`.
    ///
    /// A value that no longer decodes as `T` is reported as absent.
    ///
    /// # Errors
    /// Returns an error only if the backend read itself fails.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        let Some(raw) = self.backend.get(key)? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                tracing::warn!(key, error = %e, "discarding undecodable stored value");
                Ok(None)
            }
        }
    }

    /// # Errors
    /// Returns an error if the backend delete fails.
    pub fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.backend.remove(key)
    }

    /// Boolean flag; absent, undecodable or unreadable reads as `false`.
    pub fn flag(&self, key: &str) -> bool {
        self.get_or_default(key)
    }

    /// Unix-seconds timestamp; absent reads as `0`. Fractional seconds are
    /// truncated.
    pub fn timestamp(&self, key: &str) -> i64 {
        let value: Option<serde_json::Value> = self.get_or_default(key);
        value
            .and_then(|v| v.as_i64().or_else(|| v.as_f64().map(|f| f as i64)))
            .unwrap_or(0)
    }

    /// String value; absent reads as empty.
    pub fn string(&self, key: &str) -> String {
        self.get_or_default(key)
    }

    fn get_or_default<T: DeserializeOwned + Default>(&self, key: &str) -> T {
        match self.get(key) {
            Ok(value) => value.unwrap_or_default(),
            Err(e) => {
                tracing::warn!(key, error = %e, "store read failed, using default");
                T::default()
            }
        }
    }
}
