//! Local subscription cache port.
//!
//! A passive mirror of the last known subscription state, read once at
//! startup before the first network round trip completes. Written wholesale
//! on each successful backend sync, never patched field-by-field.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::subscription::SubscriptionState;

/// Port for the persisted single-record subscription cache.
#[async_trait]
pub trait SubscriptionCache: Send + Sync {
    /// Loads the cached record, if any. A missing record is `Ok(None)`.
    async fn load(&self) -> Result<Option<SubscriptionState>, CacheError>;

    /// Overwrites the cached record atomically.
    async fn store(&self, state: &SubscriptionState) -> Result<(), CacheError>;

    /// Removes the cached record (application logout).
    async fn clear(&self) -> Result<(), CacheError>;
}

/// Errors from cache operations.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Cache I/O failed: {0}")]
    Io(String),

    #[error("Failed to serialize subscription record: {0}")]
    Serialization(String),

    #[error("Failed to deserialize subscription record: {0}")]
    Deserialization(String),
}
