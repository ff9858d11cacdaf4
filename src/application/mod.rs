//! Application layer: the reconciler that coordinates the catalog, the
//! store gateway, the backend subscription service, and the local cache.

mod reconciler;

pub use reconciler::{EntitlementReconciler, RestoreOutcome, SelectPlanOutcome};
