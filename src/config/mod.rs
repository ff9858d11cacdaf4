//! Application configuration module
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Configuration is loaded with the
//! `RENEWLY` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use renewly_core::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod backend;
mod cache;
mod error;
mod store;

pub use backend::BackendConfig;
pub use cache::CacheConfig;
pub use error::{ConfigError, ValidationError};
pub use store::StoreConfig;

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Backend subscription service (base URL, token, timeouts)
    pub backend: BackendConfig,

    /// Host store bridge
    #[serde(default)]
    pub store: StoreConfig,

    /// Local subscription cache
    #[serde(default)]
    pub cache: CacheConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// Loads a `.env` file if present, then reads environment variables with
    /// the `RENEWLY` prefix, using `__` to separate nested values:
    ///
    /// - `RENEWLY__BACKEND__BASE_URL=https://...` -> `backend.base_url`
    /// - `RENEWLY__STORE__CALL_TIMEOUT_SECS=15` -> `store.call_timeout_secs`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or values
    /// cannot be parsed into the expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("RENEWLY")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.backend.validate()?;
        self.store.validate()?;
        self.cache.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Environment variables are process-global; serialize the tests that
    // touch them.
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn clear_env() {
        for (key, _) in std::env::vars() {
            if key.starts_with("RENEWLY__") {
                std::env::remove_var(key);
            }
        }
    }

    #[test]
    fn loads_from_prefixed_env_vars_with_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        std::env::set_var("RENEWLY__BACKEND__BASE_URL", "https://api.renewly.app");
        std::env::set_var("RENEWLY__BACKEND__API_TOKEN", "secret-token");

        let config = AppConfig::load().unwrap();

        assert_eq!(config.backend.base_url, "https://api.renewly.app");
        assert_eq!(config.backend.timeout_secs, 10);
        assert_eq!(config.backend.retry_attempts, 2);
        assert_eq!(config.store.call_timeout_secs, 30);
        assert_eq!(config.cache.path, "./data/subscription.json");
        assert!(config.validate().is_ok());

        clear_env();
    }

    #[test]
    fn overrides_nested_values_from_env() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        std::env::set_var("RENEWLY__BACKEND__BASE_URL", "https://staging.renewly.app");
        std::env::set_var("RENEWLY__BACKEND__API_TOKEN", "secret-token");
        std::env::set_var("RENEWLY__BACKEND__TIMEOUT_SECS", "5");
        std::env::set_var("RENEWLY__STORE__CALL_TIMEOUT_SECS", "15");
        std::env::set_var("RENEWLY__CACHE__PATH", "/tmp/renewly/sub.json");

        let config = AppConfig::load().unwrap();

        assert_eq!(config.backend.timeout_secs, 5);
        assert_eq!(config.store.call_timeout_secs, 15);
        assert_eq!(config.cache.path, "/tmp/renewly/sub.json");

        clear_env();
    }

    #[test]
    fn missing_backend_section_is_a_load_error() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();

        let result = AppConfig::load();

        assert!(matches!(result, Err(ConfigError::LoadError(_))));
    }
}
