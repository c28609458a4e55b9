//! Core error types for softfocus-core.
//!
//! Nothing in the timer/session core is fatal. These types exist so the
//! low-level operations can say *why* an input was refused; the
//! [`Controller`](crate::app::Controller) turns them into "no effect".

use std::path::PathBuf;
use thiserror::Error;

use crate::timer::Mode;

/// Core error type for softfocus-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors from the key-value slot backends.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to open database connection
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Database is locked
    #[error("Database is locked")]
    Locked,

    /// Data directory could not be created
    #[error("Cannot prepare data directory {path}: {source}")]
    DataDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
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
}

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Duration outside the accepted minute range
    #[error("Duration for {mode} must be between {min} and {max} minutes, got {value}")]
    DurationOutOfRange {
        mode: Mode,
        value: i64,
        min: u32,
        max: u32,
    },

    /// Duration text is not an integer
    #[error("Duration for {mode} is not a whole number: '{input}'")]
    NotANumber { mode: Mode, input: String },

    /// Task text empty after trimming
    #[error("Task text must not be empty")]
    EmptyText,

    /// Unrecognised mode name
    #[error("Unknown timer mode: '{0}'")]
    UnknownMode(String),
}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(inner, _msg) => {
                if inner.code == rusqlite::ErrorCode::DatabaseLocked
                    || inner.code == rusqlite::ErrorCode::DatabaseBusy
                {
                    StorageError::Locked
                } else {
                    StorageError::QueryFailed(err.to_string())
                }
            }
            _ => StorageError::QueryFailed(err.to_string()),
        }
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_messages_name_the_mode() {
        let err = ValidationError::DurationOutOfRange {
            mode: Mode::Focus,
            value: 121,
            min: 1,
            max: 120,
        };
        assert_eq!(
            err.to_string(),
            "Duration for Focus must be between 1 and 120 minutes, got 121"
        );
    }

    #[test]
    fn rusqlite_errors_map_to_query_failed() {
        let err: StorageError = rusqlite::Error::QueryReturnedNoRows.into();
        assert!(matches!(err, StorageError::QueryFailed(_)));
    }

    #[test]
    fn validation_wraps_into_core_error() {
        let err: CoreError = ValidationError::EmptyText.into();
        assert!(matches!(err, CoreError::Validation(ValidationError::EmptyText)));
    }
}
