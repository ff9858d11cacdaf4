//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Backend base URL must start with http:// or https://")]
    InvalidBaseUrl,

    #[error("Timeouts must be non-zero")]
    InvalidTimeout,

    #[error("Retry attempts exceeds maximum allowed (5)")]
    RetryAttemptsTooLarge,

    #[error("Cache path must not be empty")]
    InvalidCachePath,
}
