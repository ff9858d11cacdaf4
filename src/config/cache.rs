//! Local subscription cache configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Local cache configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// Path of the single-record cache file
    #[serde(default = "default_path")]
    pub path: String,
}

fn default_path() -> String {
    "./data/subscription.json".to_string()
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
        }
    }
}

impl CacheConfig {
    /// Validate cache configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.path.trim().is_empty() {
            return Err(ValidationError::InvalidCachePath);
        }
        Ok(())
    }
}
