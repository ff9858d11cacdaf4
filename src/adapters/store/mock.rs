//! In-memory store gateway for tests and shell previews.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::catalog::StoreProductId;
use crate::domain::foundation::UserId;
use crate::ports::{
    EntitlementSet, PurchaseResult, StoreError, StoreOffering, StorePurchaseGateway,
};

/// A call observed by the mock, in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedStoreCall {
    Identify(UserId),
    ListOfferings,
    Purchase(StoreProductId),
    Restore,
    LogOut,
}

/// Scriptable [`StorePurchaseGateway`] that records every call.
///
/// Queued results are consumed in order; with nothing queued, purchases
/// complete granting the purchased product id as the entitlement, and
/// restores find nothing.
#[derive(Default)]
pub struct MockStoreGateway {
    calls: Mutex<Vec<RecordedStoreCall>>,
    offerings: Mutex<Vec<StoreOffering>>,
    purchase_results: Mutex<VecDeque<Result<PurchaseResult, StoreError>>>,
    restore_results: Mutex<VecDeque<Result<EntitlementSet, StoreError>>>,
    identify_fault: Mutex<Option<StoreError>>,
}

impl MockStoreGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues the result of the next purchase call.
    pub fn queue_purchase(&self, result: Result<PurchaseResult, StoreError>) {
        self.lock(&self.purchase_results).push_back(result);
    }

    /// Queues the result of the next restore call.
    pub fn queue_restore(&self, result: Result<EntitlementSet, StoreError>) {
        self.lock(&self.restore_results).push_back(result);
    }

    /// Sets the offerings returned by `list_offerings`.
    pub fn set_offerings(&self, offerings: Vec<StoreOffering>) {
        *self.lock(&self.offerings) = offerings;
    }

    /// Makes every identify call fail with the given error.
    pub fn fail_identify(&self, error: StoreError) {
        *self.lock(&self.identify_fault) = Some(error);
    }

    /// All calls observed so far, in order.
    pub fn calls(&self) -> Vec<RecordedStoreCall> {
        self.lock(&self.calls).clone()
    }

    /// Number of purchase calls observed so far.
    pub fn purchase_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, RecordedStoreCall::Purchase(_)))
            .count()
    }

    fn record(&self, call: RecordedStoreCall) {
        self.lock(&self.calls).push(call);
    }

    fn lock<'a, T>(&self, mutex: &'a Mutex<T>) -> std::sync::MutexGuard<'a, T> {
        mutex.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl StorePurchaseGateway for MockStoreGateway {
    async fn identify(&self, user_id: &UserId) -> Result<(), StoreError> {
        self.record(RecordedStoreCall::Identify(user_id.clone()));
        match self.lock(&self.identify_fault).clone() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    async fn list_offerings(&self) -> Result<Vec<StoreOffering>, StoreError> {
        self.record(RecordedStoreCall::ListOfferings);
        Ok(self.lock(&self.offerings).clone())
    }

    async fn purchase(&self, product_id: &StoreProductId) -> Result<PurchaseResult, StoreError> {
        self.record(RecordedStoreCall::Purchase(product_id.clone()));
        self.lock(&self.purchase_results)
            .pop_front()
            .unwrap_or_else(|| {
                Ok(PurchaseResult::Completed {
                    entitlements: EntitlementSet::from_ids([product_id.as_str()]),
                })
            })
    }

    async fn restore(&self) -> Result<EntitlementSet, StoreError> {
        self.record(RecordedStoreCall::Restore);
        self.lock(&self.restore_results)
            .pop_front()
            .unwrap_or_else(|| Ok(EntitlementSet::new()))
    }

    async fn log_out(&self) -> Result<(), StoreError> {
        self.record(RecordedStoreCall::LogOut);
        Ok(())
    }
}
