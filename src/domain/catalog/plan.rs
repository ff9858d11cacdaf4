//! Plan definitions.
//!
//! A plan is a business tier (basic, standard, enterprise) carrying the
//! products it can be bought as.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

use super::product::{BillingPeriod, Platform, Product};

/// Stable business identifier of a plan tier.
///
/// Kept as a validated string rather than a closed enum because the catalog
/// may be refreshed from the backend with tiers this client version does not
/// know about.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlanCode(String);

impl PlanCode {
    pub const BASIC: &'static str = "basic";
    pub const STANDARD: &'static str = "standard";
    pub const ENTERPRISE: &'static str = "enterprise";

    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::empty_field("plan_code"));
        }
        Ok(Self(value))
    }

    pub fn basic() -> Self {
        Self(Self::BASIC.to_string())
    }

    pub fn standard() -> Self {
        Self(Self::STANDARD.to_string())
    }

    pub fn enterprise() -> Self {
        Self(Self::ENTERPRISE.to_string())
    }

    /// Total mapping from the legacy numeric tier id to a plan code.
    ///
    /// Unknown ids fall back to the lowest tier instead of failing, so a
    /// stale client facing a new backend id degrades to the safest plan.
    pub fn from_tier_id(id: i32) -> Self {
        match id {
            1 => Self::basic(),
            2 => Self::standard(),
            3 => Self::enterprise(),
            _ => Self::basic(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlanCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A subscription plan: a tier rank plus its purchasable products.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    pub code: PlanCode,
    pub tier_rank: u8,
    products: Vec<Product>,
}

impl Plan {
    /// Creates a plan, rejecting duplicate (platform, period) products.
    pub fn new(
        code: PlanCode,
        tier_rank: u8,
        products: Vec<Product>,
    ) -> Result<Self, ValidationError> {
        for (i, a) in products.iter().enumerate() {
            for b in products.iter().skip(i + 1) {
                if a.platform == b.platform && a.period == b.period {
                    return Err(ValidationError::invalid_format(
                        "products",
                        format!(
                            "duplicate product for ({}, {}) on plan '{}'",
                            a.platform, a.period, code
                        ),
                    ));
                }
            }
        }
        Ok(Self {
            code,
            tier_rank,
            products,
        })
    }

    /// Selects the product matching (period, platform).
    ///
    /// Absence means "not purchasable here", not a fault.
    pub fn product_for(&self, period: BillingPeriod, platform: Platform) -> Option<&Product> {
        self.products
            .iter()
            .find(|p| p.period == period && p.platform == platform)
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::product::StoreProductId;

    fn product(platform: Platform, period: BillingPeriod, id: Option<&str>) -> Product {
        Product {
            platform,
            period,
            store_product_id: id.map(StoreProductId::new),
            price_cents: 1999,
            currency: "USD".to_string(),
            trial_days: 0,
        }
    }

    #[test]
    fn plan_code_rejects_empty() {
        assert!(PlanCode::new("").is_err());
    }

    #[test]
    fn from_tier_id_maps_known_ids() {
        assert_eq!(PlanCode::from_tier_id(1), PlanCode::basic());
        assert_eq!(PlanCode::from_tier_id(2), PlanCode::standard());
        assert_eq!(PlanCode::from_tier_id(3), PlanCode::enterprise());
    }

    #[test]
    fn from_tier_id_falls_back_to_basic() {
        assert_eq!(PlanCode::from_tier_id(0), PlanCode::basic());
        assert_eq!(PlanCode::from_tier_id(99), PlanCode::basic());
        assert_eq!(PlanCode::from_tier_id(-7), PlanCode::basic());
    }

    #[test]
    fn plan_rejects_duplicate_platform_period_pair() {
        let result = Plan::new(
            PlanCode::standard(),
            2,
            vec![
                product(Platform::Ios, BillingPeriod::Monthly, Some("a")),
                product(Platform::Ios, BillingPeriod::Monthly, Some("b")),
            ],
        );
        assert!(result.is_err());
    }

    #[test]
    fn plan_allows_one_product_per_pair() {
        let plan = Plan::new(
            PlanCode::standard(),
            2,
            vec![
                product(Platform::Ios, BillingPeriod::Monthly, Some("a")),
                product(Platform::Ios, BillingPeriod::Yearly, Some("b")),
                product(Platform::Android, BillingPeriod::Monthly, Some("c")),
            ],
        )
        .unwrap();
        assert_eq!(plan.products().len(), 3);
    }

    #[test]
    fn product_for_matches_period_and_platform() {
        let plan = Plan::new(
            PlanCode::standard(),
            2,
            vec![
                product(Platform::Ios, BillingPeriod::Monthly, Some("ios_m")),
                product(Platform::Android, BillingPeriod::Monthly, Some("and_m")),
            ],
        )
        .unwrap();

        let found = plan
            .product_for(BillingPeriod::Monthly, Platform::Android)
            .unwrap();
        assert_eq!(found.store_product_id.as_ref().unwrap().as_str(), "and_m");
    }

    #[test]
    fn product_for_returns_none_when_absent() {
        let plan = Plan::new(
            PlanCode::standard(),
            2,
            vec![product(Platform::Ios, BillingPeriod::Monthly, Some("a"))],
        )
        .unwrap();

        assert!(plan
            .product_for(BillingPeriod::Yearly, Platform::Ios)
            .is_none());
    }
}
