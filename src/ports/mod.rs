//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the reconciliation core and the outside world. Adapters implement them.
//!
//! - `StorePurchaseGateway` - the device-native purchase subsystem
//! - `SubscriptionService` - the backend's subscription-of-record endpoint
//! - `SubscriptionCache` - the persisted single-record local cache

mod store_gateway;
mod subscription_cache;
mod subscription_service;

pub use store_gateway::{
    EntitlementSet, PurchaseResult, StoreError, StoreErrorCode, StoreOffering,
    StorePurchaseGateway,
};
pub use subscription_cache::{CacheError, SubscriptionCache};
pub use subscription_service::{BackendError, BackendErrorCode, SubscriptionService};
