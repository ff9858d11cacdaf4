//! Purchasable product definitions.
//!
//! A product is one plan priced for one (platform, billing period) pair and
//! mapped to the store identifier the device purchase SDK understands.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Device platform a product is sold on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Ios,
    Android,
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Ios => write!(f, "ios"),
            Platform::Android => write!(f, "android"),
        }
    }
}

/// Billing period a product can be purchased for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillingPeriod {
    Monthly,
    Yearly,
}

impl fmt::Display for BillingPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BillingPeriod::Monthly => write!(f, "monthly"),
            BillingPeriod::Yearly => write!(f, "yearly"),
        }
    }
}

/// Opaque identifier used to look up a purchasable offering in the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoreProductId(String);

impl StoreProductId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StoreProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One plan priced for one (platform, period) pair.
///
/// A product without a `store_product_id` exists for display only (for
/// example a web-only price) and must never be offered for purchase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub platform: Platform,
    pub period: BillingPeriod,
    pub store_product_id: Option<StoreProductId>,
    pub price_cents: i64,
    pub currency: String,
    pub trial_days: u32,
}

impl Product {
    /// Returns true if this product can be bought through the device store.
    pub fn is_purchasable(&self) -> bool {
        self.store_product_id.is_some()
    }
}
