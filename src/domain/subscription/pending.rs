//! In-flight purchase record.

use crate::domain::catalog::{BillingPeriod, PlanCode, StoreProductId};

/// What the user is currently buying.
///
/// Exists only between "purchase initiated" and "purchase settled or
/// cancelled". Never persisted; the UI reads it to render the in-flight
/// state, and it is cleared on every terminal outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingPurchase {
    pub target_plan_code: PlanCode,
    pub target_period: BillingPeriod,
    pub store_product_id: StoreProductId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_purchase_carries_target_and_store_id() {
        let pending = PendingPurchase {
            target_plan_code: PlanCode::enterprise(),
            target_period: BillingPeriod::Monthly,
            store_product_id: StoreProductId::new("renewly_enterprise_monthly_ios"),
        };
        assert_eq!(pending.target_plan_code, PlanCode::enterprise());
        assert_eq!(pending.target_period, BillingPeriod::Monthly);
    }
}
