//! In-memory subscription cache for tests and shell previews.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::subscription::SubscriptionState;
use crate::ports::{CacheError, SubscriptionCache};

#[derive(Default)]
pub struct InMemorySubscriptionCache {
    record: Mutex<Option<SubscriptionState>>,
}

impl InMemorySubscriptionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seeded(state: SubscriptionState) -> Self {
        Self {
            record: Mutex::new(Some(state)),
        }
    }
}

#[async_trait]
impl SubscriptionCache for InMemorySubscriptionCache {
    async fn load(&self) -> Result<Option<SubscriptionState>, CacheError> {
        Ok(self.record.lock().unwrap_or_else(|e| e.into_inner()).clone())
    }

    async fn store(&self, state: &SubscriptionState) -> Result<(), CacheError> {
        *self.record.lock().unwrap_or_else(|e| e.into_inner()) = Some(state.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<(), CacheError> {
        *self.record.lock().unwrap_or_else(|e| e.into_inner()) = None;
        Ok(())
    }
}
