//! File-backed subscription cache.
//!
//! Persists the single subscription record as a JSON file. Writes go through
//! a temp file followed by a rename so a crash mid-write never leaves a
//! truncated record behind.

use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;

use crate::config::CacheConfig;
use crate::domain::subscription::SubscriptionState;
use crate::ports::{CacheError, SubscriptionCache};

pub struct FileSubscriptionCache {
    path: PathBuf,
}

impl FileSubscriptionCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn from_config(config: &CacheConfig) -> Self {
        Self::new(&config.path)
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

#[async_trait]
impl SubscriptionCache for FileSubscriptionCache {
    async fn load(&self) -> Result<Option<SubscriptionState>, CacheError> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(CacheError::Io(e.to_string())),
        };

        let state = serde_json::from_slice(&bytes)
            .map_err(|e| CacheError::Deserialization(e.to_string()))?;
        Ok(Some(state))
    }

    async fn store(&self, state: &SubscriptionState) -> Result<(), CacheError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| CacheError::Io(e.to_string()))?;
        }

        let json = serde_json::to_vec_pretty(state)
            .map_err(|e| CacheError::Serialization(e.to_string()))?;

        let temp = self.temp_path();
        fs::write(&temp, &json)
            .await
            .map_err(|e| CacheError::Io(e.to_string()))?;
        fs::rename(&temp, &self.path)
            .await
            .map_err(|e| CacheError::Io(e.to_string()))?;
        Ok(())
    }

    async fn clear(&self) -> Result<(), CacheError> {
        match fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(CacheError::Io(e.to_string())),
        }
    }
}
