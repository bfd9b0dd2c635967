//! Core error types for sportiq-core.
//!
//! This module defines the error hierarchy using thiserror. Only persistence,
//! configuration and catalog failures are surfaced to callers; network
//! failures are absorbed by the launch resolver and never reach the UI.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for sportiq-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Key-value store errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Quiz or workout catalog errors
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

}

/// Key-value store errors.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to open the backing database
    #[error("Failed to open store at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// A value could not be serialized before writing
    #[error("Failed to serialize value for '{key}': {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// Backend read or write failed
    #[error("Store query failed: {0}")]
    QueryFailed(String),

    /// Database is locked
    #[error("Store is locked")]
    Locked,

    /// The backend mutex was poisoned by a panicking writer
    #[error("Store lock poisoned")]
    Poisoned,
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Data directory could not be determined or created
    #[error("Data directory unavailable: {0}")]
    DataDir(String),
}

/// Local catalog errors (quiz banks, workout generators).
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Nothing is available for the requested key
    #[error("No {kind} available for '{key}'")]
    NotFound { kind: &'static str, key: String },

    /// The catalog source could not be read or parsed
    #[error("Catalog unavailable: {0}")]
    Unavailable(String),

    /// An entry violates a structural invariant
    #[error("Invalid catalog entry '{id}': {message}")]
    InvalidEntry { id: String, message: String },
}

impl CatalogError {
    /// Whether a UI should offer a retry for this failure.
    pub fn is_retryable(&self) -> bool {
        matches!(self, CatalogError::NotFound { .. } | CatalogError::Unavailable(_))
    }
}

/// Remote configuration fetch errors.
///
/// These never escape the resolver; they select the fallback path.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Request could not be sent or the connection failed
    #[error("Request failed: {0}")]
    Request(String),

    /// Server answered with a non-success status
    #[error("Server returned status {0}")]
    Status(u16),

    /// No response within the allotted time
    #[error("No response within {timeout_ms} ms")]
    Timeout { timeout_ms: u64 },

    /// Response body is not the expected JSON object
    #[error("Malformed response: {0}")]
    Malformed(String),
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(inner, _msg) => {
                if inner.code == rusqlite::ErrorCode::DatabaseLocked {
                    StoreError::Locked
                } else {
                    StoreError::QueryFailed(err.to_string())
                }
            }
            _ => StoreError::QueryFailed(err.to_string()),
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            FetchError::Status(status.as_u16())
        } else {
            FetchError::Request(err.to_string())
        }
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
