//! Core error types for dayband-core.
//!
//! Every fallible operation in the library reports through this
//! hierarchy; per-event soft failures (no selection, wrong mode) are
//! not errors and are reported as event outcomes instead.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for dayband-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Export-related errors
    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    /// Configuration-related errors
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

/// Validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Dataset construction with the wrong number of slots
    #[error("Expected exactly {expected} slots, got {actual}")]
    WrongSlotCount { expected: usize, actual: usize },

    /// Out of bounds
    #[error("Index {index} out of bounds for dataset (length: {len})")]
    OutOfBounds { index: usize, len: usize },

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// Export-specific errors.
#[derive(Error, Debug)]
pub enum ExportError {
    /// CSV writer failure
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Failed to create or write the output file
    #[error("Failed to write export to {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed bootstrap input
    #[error("Invalid input row {row}: {message}")]
    InvalidInput { row: usize, message: String },
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
