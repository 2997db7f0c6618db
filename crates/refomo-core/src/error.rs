//! Core error types for refomo-core.
//!
//! Storage and config failures are modeled with thiserror so the boundary
//! that swallows them has a typed value to log. None of these errors are
//! fatal to the timer: the store degrades to an empty collection on read
//! failure and drops the write on write failure.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for refomo-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Record-store errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Record-store errors. Caught at the store's public boundary and logged,
/// never returned to callers.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to read the records file
    #[error("Failed to read records from {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Records file exists but does not parse
    #[error("Failed to parse records at {path}: {source}")]
    ParseFailed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Failed to serialize the collection
    #[error("Failed to serialize records: {0}")]
    SerializeFailed(#[source] serde_json::Error),

    /// Failed to write the records file
    #[error("Failed to write records to {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Unknown or malformed configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
