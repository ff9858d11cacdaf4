//! Subscription state snapshot.
//!
//! The authoritative record of what the user is subscribed to, created or
//! overwritten wholesale from every Backend Subscription Service response.
//! Only the Entitlement Reconciler writes it; UI components read it.

use serde::{Deserialize, Serialize};

use crate::domain::catalog::{BillingPeriod, PlanCode};
use crate::domain::foundation::Timestamp;

/// How the user's current access was granted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionSource {
    /// Paid through the device store.
    Store,
    /// Granted through a promotional code; store flows are disabled.
    Promo,
}

/// Period of the subscription of record.
///
/// `Forever` appears on promotional grants that never renew.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanPeriod {
    Monthly,
    Yearly,
    Forever,
}

impl PlanPeriod {
    /// Whether this period matches a purchasable billing period.
    pub fn matches(&self, period: BillingPeriod) -> bool {
        matches!(
            (self, period),
            (PlanPeriod::Monthly, BillingPeriod::Monthly)
                | (PlanPeriod::Yearly, BillingPeriod::Yearly)
        )
    }
}

impl From<BillingPeriod> for PlanPeriod {
    fn from(period: BillingPeriod) -> Self {
        match period {
            BillingPeriod::Monthly => PlanPeriod::Monthly,
            BillingPeriod::Yearly => PlanPeriod::Yearly,
        }
    }
}

/// Snapshot of the user's subscription of record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionState {
    pub plan_code: PlanCode,
    pub period: PlanPeriod,
    pub trial_ends_at: Option<Timestamp>,
    pub source: SubscriptionSource,
    pub is_mobile_user: bool,
    /// When this snapshot was taken from the backend.
    pub synced_at: Timestamp,
}

impl SubscriptionState {
    /// Whole days of trial remaining at `now`.
    ///
    /// Uses ceiling so a trial ending in 0.2 days still reads "1 day".
    /// Returns `None` when there is no trial or it has lapsed; the UI then
    /// shows nothing.
    pub fn trial_days_remaining(&self, now: Timestamp) -> Option<i64> {
        let ends_at = self.trial_ends_at?;
        // Millisecond resolution: any positive remainder, however small,
        // still displays as one day.
        let remaining_ms = ends_at.duration_since(&now).num_milliseconds();
        if remaining_ms <= 0 {
            return None;
        }
        const DAY_MS: i64 = 86_400_000;
        Some((remaining_ms + DAY_MS - 1) / DAY_MS)
    }

    /// Whether the requested (plan, period) is what the user already has.
    pub fn is_active_plan(&self, code: &PlanCode, period: BillingPeriod) -> bool {
        &self.plan_code == code && self.period.matches(period)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn state(trial_ends_at: Option<Timestamp>) -> SubscriptionState {
        SubscriptionState {
            plan_code: PlanCode::standard(),
            period: PlanPeriod::Monthly,
            trial_ends_at,
            source: SubscriptionSource::Store,
            is_mobile_user: true,
            synced_at: Timestamp::from_unix_secs(0),
        }
    }

    #[test]
    fn no_trial_means_no_days_remaining() {
        let now = Timestamp::from_unix_secs(1_000_000);
        assert_eq!(state(None).trial_days_remaining(now), None);
    }

    #[test]
    fn lapsed_trial_means_no_days_remaining() {
        let now = Timestamp::from_unix_secs(1_000_000);
        let s = state(Some(now.add_days(-1)));
        assert_eq!(s.trial_days_remaining(now), None);
    }

    #[test]
    fn trial_ending_exactly_now_means_no_days_remaining() {
        let now = Timestamp::from_unix_secs(1_000_000);
        let s = state(Some(now));
        assert_eq!(s.trial_days_remaining(now), None);
    }

    #[test]
    fn half_day_remaining_rounds_up_to_one() {
        let now = Timestamp::from_unix_secs(1_000_000);
        let s = state(Some(now.plus_secs(43_200)));
        assert_eq!(s.trial_days_remaining(now), Some(1));
    }

    #[test]
    fn sub_second_remainder_still_reads_one_day() {
        let now = Timestamp::from_unix_secs(1_000_000);
        let ends_at =
            Timestamp::from_datetime(*now.as_datetime() + chrono::Duration::milliseconds(200));
        let s = state(Some(ends_at));
        assert_eq!(s.trial_days_remaining(now), Some(1));
    }

    #[test]
    fn whole_days_remain_exact() {
        let now = Timestamp::from_unix_secs(1_000_000);
        let s = state(Some(now.add_days(3)));
        assert_eq!(s.trial_days_remaining(now), Some(3));
    }

    #[test]
    fn repeated_calls_with_same_now_are_idempotent() {
        let now = Timestamp::from_unix_secs(1_000_000);
        let s = state(Some(now.plus_secs(90_000)));
        let first = s.trial_days_remaining(now);
        assert_eq!(first, s.trial_days_remaining(now));
        assert_eq!(first, Some(2));
    }

    proptest! {
        #[test]
        fn remaining_days_always_cover_the_remaining_span(offset_secs in 1_i64..(400 * 86_400)) {
            let now = Timestamp::from_unix_secs(1_000_000);
            let s = state(Some(now.plus_secs(offset_secs as u64)));
            let days = s.trial_days_remaining(now).unwrap();
            // Ceiling: days is the least integer covering the span.
            prop_assert!(days * 86_400 >= offset_secs);
            prop_assert!((days - 1) * 86_400 < offset_secs);
        }

        #[test]
        fn lapsed_trials_never_report_days(offset_secs in 0_i64..(400 * 86_400)) {
            let now = Timestamp::from_unix_secs(400 * 86_400);
            let ends_at = Timestamp::from_unix_secs((400 * 86_400 - offset_secs) as u64);
            let s = state(Some(ends_at));
            prop_assert_eq!(s.trial_days_remaining(now), None);
        }
    }

    #[test]
    fn plan_period_matches_billing_period() {
        assert!(PlanPeriod::Monthly.matches(BillingPeriod::Monthly));
        assert!(PlanPeriod::Yearly.matches(BillingPeriod::Yearly));
        assert!(!PlanPeriod::Monthly.matches(BillingPeriod::Yearly));
        assert!(!PlanPeriod::Forever.matches(BillingPeriod::Monthly));
        assert!(!PlanPeriod::Forever.matches(BillingPeriod::Yearly));
    }

    #[test]
    fn is_active_plan_requires_both_code_and_period() {
        let s = state(None);
        assert!(s.is_active_plan(&PlanCode::standard(), BillingPeriod::Monthly));
        assert!(!s.is_active_plan(&PlanCode::standard(), BillingPeriod::Yearly));
        assert!(!s.is_active_plan(&PlanCode::enterprise(), BillingPeriod::Monthly));
    }

    #[test]
    fn state_serializes_camel_case() {
        let json = serde_json::to_value(state(None)).unwrap();
        assert!(json.get("planCode").is_some());
        assert!(json.get("trialEndsAt").is_some());
        assert!(json.get("isMobileUser").is_some());
        assert!(json.get("syncedAt").is_some());
    }

    #[test]
    fn source_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&SubscriptionSource::Promo).unwrap(),
            "\"promo\""
        );
    }
}
