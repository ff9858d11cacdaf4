//! Reconciliation error taxonomy.
//!
//! The first six variants are local validation outcomes raised before any
//! store call: cheap, synchronous, returned directly to the caller for
//! immediate feedback and never logged as errors. `StoreFailure` and
//! `BackendSyncFailure` originate from external systems and always carry the
//! underlying reason for display and logging.

use crate::domain::foundation::{DomainError, ErrorCode};

/// Errors from plan selection, purchase, and restore flows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileError {
    /// Access was granted by promo code; store flows are disabled.
    PromoLocked,

    /// The account is not a mobile-store account; mutating operations are
    /// rejected before any store call.
    PlatformRestricted,

    /// The requested (plan, period) is already the active subscription.
    /// A distinct signal, not necessarily an error toast.
    AlreadyActive,

    /// Yearly subscriptions may not move to monthly, regardless of tier.
    DowngradeRestricted,

    /// No purchasable product exists for the requested plan and period on
    /// this platform.
    ProductUnavailable,

    /// Another purchase/restore is already in flight.
    Busy,

    /// The device store reported a failure.
    StoreFailure { reason: String },

    /// The backend refetch after a settled operation failed.
    BackendSyncFailure { reason: String },
}

impl ReconcileError {
    pub fn store_failure(reason: impl Into<String>) -> Self {
        ReconcileError::StoreFailure {
            reason: reason.into(),
        }
    }

    pub fn backend_sync_failure(reason: impl Into<String>) -> Self {
        ReconcileError::BackendSyncFailure {
            reason: reason.into(),
        }
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            ReconcileError::PromoLocked => ErrorCode::PromoLocked,
            ReconcileError::PlatformRestricted => ErrorCode::PlatformRestricted,
            ReconcileError::AlreadyActive => ErrorCode::AlreadyActive,
            ReconcileError::DowngradeRestricted => ErrorCode::DowngradeRestricted,
            ReconcileError::ProductUnavailable => ErrorCode::ProductUnavailable,
            ReconcileError::Busy => ErrorCode::Busy,
            ReconcileError::StoreFailure { .. } => ErrorCode::StoreFailure,
            ReconcileError::BackendSyncFailure { .. } => ErrorCode::BackendSyncFailure,
        }
    }

    /// Returns a user-friendly error message.
    pub fn message(&self) -> String {
        match self {
            ReconcileError::PromoLocked => {
                "Your access was granted with a promotional code and cannot be changed here"
                    .to_string()
            }
            ReconcileError::PlatformRestricted => {
                "This subscription is managed outside the mobile app".to_string()
            }
            ReconcileError::AlreadyActive => "You're already on this plan".to_string(),
            ReconcileError::DowngradeRestricted => {
                "A yearly subscription cannot be changed to monthly".to_string()
            }
            ReconcileError::ProductUnavailable => {
                "This plan is not available for purchase on this device".to_string()
            }
            ReconcileError::Busy => "Another purchase is already in progress".to_string(),
            ReconcileError::StoreFailure { reason } => format!("Purchase failed: {}", reason),
            ReconcileError::BackendSyncFailure { reason } => {
                format!("Could not refresh your subscription: {}", reason)
            }
        }
    }

    /// True for the local validation outcomes raised before any store call.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ReconcileError::PromoLocked
                | ReconcileError::PlatformRestricted
                | ReconcileError::AlreadyActive
                | ReconcileError::DowngradeRestricted
                | ReconcileError::ProductUnavailable
                | ReconcileError::Busy
        )
    }

    /// Returns true if the UI should offer a retry affordance.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ReconcileError::StoreFailure { .. } | ReconcileError::BackendSyncFailure { .. }
        )
    }
}

impl std::fmt::Display for ReconcileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ReconcileError {}

impl From<ReconcileError> for DomainError {
    fn from(err: ReconcileError) -> Self {
        DomainError::new(err.code(), err.message())
    }
}
