//! Error types for cryptoscan-core.

use thiserror::Error;

/// Core error types.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Invalid value for config key {key}: {reason}")]
    InvalidConfigValue { key: String, reason: String },

    #[error("Unknown system status: {0}")]
    UnknownStatus(String),
}

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
