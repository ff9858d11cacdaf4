//! Store purchase gateway port.
//!
//! The only contract through which the rest of the crate may talk to the
//! device's native purchase subsystem. Any concrete purchase SDK satisfying
//! this shape is substitutable.
//!
//! # Failure semantics
//!
//! Adapters wrap every SDK-level fault into a [`StoreError`]; callers never
//! receive an unhandled fault from this port. A user-dismissed purchase
//! sheet is the distinct [`PurchaseResult::Cancelled`] outcome, never an
//! error.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::domain::catalog::StoreProductId;
use crate::domain::foundation::UserId;

/// Port for the device-native purchase subsystem.
#[async_trait]
pub trait StorePurchaseGateway: Send + Sync {
    /// Associates the store identity with the backend user.
    ///
    /// Best-effort: callers log a failure and continue, because the backend
    /// reconciliation step is the final source of truth regardless.
    async fn identify(&self, user_id: &UserId) -> Result<(), StoreError>;

    /// Lists the packages currently purchasable on this device.
    async fn list_offerings(&self) -> Result<Vec<StoreOffering>, StoreError>;

    /// Executes a purchase of the given store product.
    async fn purchase(&self, product_id: &StoreProductId)
        -> Result<PurchaseResult, StoreError>;

    /// Restores previous purchases.
    ///
    /// An empty entitlement set is a valid, non-error result meaning
    /// "nothing to restore".
    async fn restore(&self) -> Result<EntitlementSet, StoreError>;

    /// Severs the store identity association on application logout.
    /// Best-effort; failures are logged, not surfaced.
    async fn log_out(&self) -> Result<(), StoreError>;
}

/// Active entitlement ids reported by the store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntitlementSet(BTreeSet<String>);

impl EntitlementSet {
    pub fn new() -> Self {
        Self(BTreeSet::new())
    }

    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(ids.into_iter().map(Into::into).collect())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.0.contains(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

/// One purchasable package as reported by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreOffering {
    pub store_product_id: StoreProductId,
    /// Localized price string as the store renders it (e.g. "$9.99").
    pub localized_price: String,
}

/// Terminal outcome of a purchase call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PurchaseResult {
    /// The store call itself succeeded. The entitlement set may be empty;
    /// entitlement propagation can lag the purchase call returning.
    Completed { entitlements: EntitlementSet },

    /// The user dismissed the native purchase sheet.
    Cancelled,
}

/// Errors from store gateway operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreError {
    /// Error code for categorization.
    pub code: StoreErrorCode,

    /// Human-readable message.
    pub message: String,

    /// Whether the operation can be retried.
    pub retryable: bool,
}

impl StoreError {
    /// Create a new store error.
    pub fn new(code: StoreErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            retryable: code.is_retryable(),
        }
    }

    /// Create a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(StoreErrorCode::NetworkError, message)
    }

    /// Create a timeout error.
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(StoreErrorCode::Timeout, message)
    }

    /// Create an error for a severed host bridge.
    pub fn bridge_closed(message: impl Into<String>) -> Self {
        Self::new(StoreErrorCode::BridgeClosed, message)
    }

    /// Create a product-not-found error.
    pub fn product_not_found(product_id: &StoreProductId) -> Self {
        Self::new(
            StoreErrorCode::ProductNotFound,
            format!("Store product '{}' not found", product_id),
        )
    }
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for StoreError {}

/// Store error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreErrorCode {
    /// Network connectivity issue.
    NetworkError,

    /// The call exceeded the configured deadline.
    Timeout,

    /// The device store reported an outage.
    StoreUnavailable,

    /// The store product id is unknown to the store.
    ProductNotFound,

    /// Purchases are disallowed on this device (parental controls etc.).
    PurchaseNotAllowed,

    /// The host bridge to the native SDK was dropped.
    BridgeClosed,

    /// Unknown error.
    Unknown,
}

impl StoreErrorCode {
    /// Check if this error type is typically retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            StoreErrorCode::NetworkError
                | StoreErrorCode::Timeout
                | StoreErrorCode::StoreUnavailable
        )
    }
}

impl std::fmt::Display for StoreErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            StoreErrorCode::NetworkError => "network_error",
            StoreErrorCode::Timeout => "timeout",
            StoreErrorCode::StoreUnavailable => "store_unavailable",
            StoreErrorCode::ProductNotFound => "product_not_found",
            StoreErrorCode::PurchaseNotAllowed => "purchase_not_allowed",
            StoreErrorCode::BridgeClosed => "bridge_closed",
            StoreErrorCode::Unknown => "unknown",
        };
        write!(f, "{}", s)
    }
}
