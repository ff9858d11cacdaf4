//! Reconcile operation phase state machine.
//!
//! Tracks the lifecycle of the single purchase/restore operation that may be
//! in flight at any time.

use crate::domain::foundation::StateMachine;
use serde::{Deserialize, Serialize};

/// Phase of the pending reconcile operation.
///
/// `Idle → PurchaseInFlight → {Settled, Cancelled, Failed} → Idle`.
/// The terminal phases are transient; the reconciler always returns to
/// `Idle` after reporting the outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReconcilePhase {
    /// No operation outstanding.
    Idle,

    /// A store purchase or restore is outstanding.
    /// New operations are rejected, never queued.
    PurchaseInFlight,

    /// The store call succeeded; backend resynchronization follows.
    Settled,

    /// The user dismissed the native purchase sheet. Not an error.
    Cancelled,

    /// The store reported a failure.
    Failed,
}

impl ReconcilePhase {
    /// Whether a new purchase/restore may start in this phase.
    pub fn accepts_new_operation(&self) -> bool {
        matches!(self, ReconcilePhase::Idle)
    }
}

impl StateMachine for ReconcilePhase {
    fn can_transition_to(&self, target: &Self) -> bool {
        use ReconcilePhase::*;
        matches!(
            (self, target),
            (Idle, PurchaseInFlight)
                | (PurchaseInFlight, Settled)
                | (PurchaseInFlight, Cancelled)
                | (PurchaseInFlight, Failed)
                | (Settled, Idle)
                | (Cancelled, Idle)
                | (Failed, Idle)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use ReconcilePhase::*;
        match self {
            Idle => vec![PurchaseInFlight],
            PurchaseInFlight => vec![Settled, Cancelled, Failed],
            Settled => vec![Idle],
            Cancelled => vec![Idle],
            Failed => vec![Idle],
        }
    }
}
