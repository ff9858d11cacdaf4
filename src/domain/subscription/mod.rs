//! Subscription domain module.
//!
//! The subscription-of-record snapshot, the in-flight purchase record, the
//! reconcile phase machine, and the reconciliation error taxonomy.
//!
//! # Module Structure
//!
//! - `errors` - ReconcileError taxonomy
//! - `pending` - PendingPurchase ephemeral record
//! - `phase` - ReconcilePhase state machine
//! - `state` - SubscriptionState snapshot and trial arithmetic

mod errors;
mod pending;
mod phase;
mod state;

pub use errors::ReconcileError;
pub use pending::PendingPurchase;
pub use phase::ReconcilePhase;
pub use state::{PlanPeriod, SubscriptionSource, SubscriptionState};
