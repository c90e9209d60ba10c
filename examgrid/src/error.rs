//! Error types for the configuration and loading layer.
//!
//! The grid engine itself never fails: malformed input is normalized.
//! Only loading a [`GridConfig`](crate::GridConfig) or a row file can go wrong.

use thiserror::Error;

/// Errors raised while loading grid configuration or row data.
#[derive(Debug, Error)]
pub enum GridError {
    /// Reading a file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The input was not valid JSON or did not match the expected shape.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A configuration value is out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A column key was requested that no column declares.
    #[error("Unknown column '{0}'")]
    UnknownColumn(String),

    /// Row data had the wrong shape (for example, not an array of objects).
    #[error("Invalid rows: {0}")]
    InvalidRows(String),
}

/// Result alias used by the fallible parts of the crate.
pub type Result<T> = std::result::Result<T, GridError>;
