//! Backend subscription service configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;

/// Backend subscription service configuration
#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the subscription backend
    pub base_url: String,

    /// Bearer token presented on every request
    pub api_token: SecretString,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Retries on retryable failures, in addition to the first attempt
    #[serde(default = "default_retry_attempts")]
    pub retry_attempts: u32,
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_retry_attempts() -> u32 {
    2
}

impl BackendConfig {
    /// Validate backend configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.base_url.is_empty() {
            return Err(ValidationError::MissingRequired("BACKEND__BASE_URL"));
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ValidationError::InvalidBaseUrl);
        }
        if self.api_token.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("BACKEND__API_TOKEN"));
        }
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        if self.retry_attempts > 5 {
            return Err(ValidationError::RetryAttemptsTooLarge);
        }
        Ok(())
    }
}
