//! Store bridge configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Host store bridge configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Timeout in seconds for bridge calls such as offerings and restore.
    /// The purchase sheet itself is owned by the device store and is not
    /// bounded by this value.
    #[serde(default = "default_call_timeout_secs")]
    pub call_timeout_secs: u64,
}

fn default_call_timeout_secs() -> u64 {
    30
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            call_timeout_secs: default_call_timeout_secs(),
        }
    }
}

impl StoreConfig {
    /// Validate store configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.call_timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}
