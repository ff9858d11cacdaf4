//! Plan catalog: the set of plans available for purchase.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

use super::plan::{Plan, PlanCode};
use super::product::{BillingPeriod, Platform, Product, StoreProductId};

/// Collection of the plans this client can present and sell.
///
/// Seeded from [`PlanCatalog::default_catalog`] at startup and replaced
/// wholesale when the backend ships a fresher one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanCatalog {
    plans: Vec<Plan>,
}

impl PlanCatalog {
    /// Creates a catalog, rejecting duplicate plan codes.
    pub fn new(plans: Vec<Plan>) -> Result<Self, ValidationError> {
        for (i, a) in plans.iter().enumerate() {
            for b in plans.iter().skip(i + 1) {
                if a.code == b.code {
                    return Err(ValidationError::invalid_format(
                        "plans",
                        format!("duplicate plan code '{}'", a.code),
                    ));
                }
            }
        }
        Ok(Self { plans })
    }

    /// Returns the built-in catalog shipped with the client.
    pub fn default_catalog() -> Self {
        DEFAULT_CATALOG.clone()
    }

    /// Looks up a plan by code.
    pub fn plan(&self, code: &PlanCode) -> Option<&Plan> {
        self.plans.iter().find(|p| &p.code == code)
    }

    /// Selects the purchasable product for (plan, period, platform).
    ///
    /// Returns `None` when the plan is unknown, the (period, platform) pair
    /// has no product, or the product carries no store id. Callers treat
    /// absence as "not purchasable here", never as a fault.
    pub fn purchasable_product(
        &self,
        code: &PlanCode,
        period: BillingPeriod,
        platform: Platform,
    ) -> Option<&Product> {
        self.plan(code)?
            .product_for(period, platform)
            .filter(|p| p.is_purchasable())
    }

    /// The plan highlighted as "most popular" on the plan page.
    ///
    /// Picks the highest-ranked plan below the top tier; with fewer than two
    /// plans, falls back to the highest rank.
    pub fn popular(&self) -> Option<&Plan> {
        let top = self.plans.iter().map(|p| p.tier_rank).max()?;
        self.plans
            .iter()
            .filter(|p| p.tier_rank < top)
            .max_by_key(|p| p.tier_rank)
            .or_else(|| self.plans.iter().max_by_key(|p| p.tier_rank))
    }

    pub fn plans(&self) -> &[Plan] {
        &self.plans
    }
}

static DEFAULT_CATALOG: Lazy<PlanCatalog> = Lazy::new(|| {
    let product = |platform: Platform,
                   period: BillingPeriod,
                   store_id: &str,
                   price_cents: i64,
                   trial_days: u32| Product {
        platform,
        period,
        store_product_id: Some(StoreProductId::new(store_id)),
        price_cents,
        currency: "USD".to_string(),
        trial_days,
    };

    let plans = vec![
        Plan::new(
            PlanCode::basic(),
            1,
            vec![
                product(Platform::Ios, BillingPeriod::Monthly, "renewly_basic_monthly_ios", 499, 7),
                product(Platform::Ios, BillingPeriod::Yearly, "renewly_basic_yearly_ios", 4_990, 7),
                product(Platform::Android, BillingPeriod::Monthly, "renewly_basic_monthly_android", 499, 7),
                product(Platform::Android, BillingPeriod::Yearly, "renewly_basic_yearly_android", 4_990, 7),
            ],
        ),
        Plan::new(
            PlanCode::standard(),
            2,
            vec![
                product(Platform::Ios, BillingPeriod::Monthly, "renewly_standard_monthly_ios", 999, 14),
                product(Platform::Ios, BillingPeriod::Yearly, "renewly_standard_yearly_ios", 9_990, 14),
                product(Platform::Android, BillingPeriod::Monthly, "renewly_standard_monthly_android", 999, 14),
                product(Platform::Android, BillingPeriod::Yearly, "renewly_standard_yearly_android", 9_990, 14),
            ],
        ),
        Plan::new(
            PlanCode::enterprise(),
            3,
            vec![
                product(Platform::Ios, BillingPeriod::Monthly, "renewly_enterprise_monthly_ios", 2_499, 14),
                product(Platform::Ios, BillingPeriod::Yearly, "renewly_enterprise_yearly_ios", 24_990, 14),
                product(Platform::Android, BillingPeriod::Monthly, "renewly_enterprise_monthly_android", 2_499, 14),
                product(Platform::Android, BillingPeriod::Yearly, "renewly_enterprise_yearly_android", 24_990, 14),
            ],
        ),
    ];

    // Static data; constructor failures are programmer error.
    let plans = plans
        .into_iter()
        .collect::<Result<Vec<_>, _>>()
        .expect("built-in catalog is well-formed");
    PlanCatalog::new(plans).expect("built-in catalog has unique plan codes")
});
