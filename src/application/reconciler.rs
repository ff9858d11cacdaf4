//! EntitlementReconciler - orchestrates plan changes, restores, and
//! backend resynchronization.
//!
//! The reconciler owns the authoritative `SubscriptionState` snapshot: UI
//! components read it and dispatch intents, only the reconciler writes it.
//! After any settled store operation it refetches from the backend and
//! replaces the snapshot wholesale; it never infers final state from the
//! store response.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, RwLock};
use std::sync::Arc;

use crate::domain::catalog::{BillingPeriod, PlanCatalog, PlanCode, Platform};
use crate::domain::foundation::{OperationId, Timestamp, UserId};
use crate::domain::subscription::{
    PendingPurchase, PlanPeriod, ReconcileError, ReconcilePhase, SubscriptionSource,
    SubscriptionState,
};
use crate::ports::{
    PurchaseResult, StorePurchaseGateway, SubscriptionCache, SubscriptionService,
};

/// Outcome of a plan selection that reached the store.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectPlanOutcome {
    /// The purchase settled and the snapshot now reflects the backend's
    /// latest response. Changes may take a few moments to propagate
    /// store-side, so the plan shown can briefly lag the purchase.
    Purchased(SubscriptionState),

    /// The user dismissed the native purchase sheet. Not an error; the UI
    /// shows nothing.
    Cancelled,
}

/// Outcome of a restore request.
#[derive(Debug, Clone, PartialEq)]
pub enum RestoreOutcome {
    /// Entitlements were found and the snapshot was resynchronized.
    Restored(SubscriptionState),

    /// The store reported no entitlements to restore. Not an error.
    NothingToRestore,
}

/// Orchestrates purchase/restore flows against the store gateway and keeps
/// the local snapshot consistent with the backend subscription service.
///
/// Only one purchase/restore operation may be in flight at a time; a second
/// request is rejected with [`ReconcileError::Busy`] rather than queued, so
/// two store purchases can never race.
pub struct EntitlementReconciler {
    store: Arc<dyn StorePurchaseGateway>,
    backend: Arc<dyn SubscriptionService>,
    cache: Arc<dyn SubscriptionCache>,
    catalog: PlanCatalog,
    platform: Platform,
    user_id: UserId,
    state: RwLock<Option<SubscriptionState>>,
    phase: Mutex<ReconcilePhase>,
    pending: Mutex<Option<PendingPurchase>>,
    in_flight: AtomicBool,
}

impl EntitlementReconciler {
    pub fn new(
        store: Arc<dyn StorePurchaseGateway>,
        backend: Arc<dyn SubscriptionService>,
        cache: Arc<dyn SubscriptionCache>,
        catalog: PlanCatalog,
        platform: Platform,
        user_id: UserId,
    ) -> Self {
        Self {
            store,
            backend,
            cache,
            catalog,
            platform,
            user_id,
            state: RwLock::new(None),
            phase: Mutex::new(ReconcilePhase::Idle),
            pending: Mutex::new(None),
            in_flight: AtomicBool::new(false),
        }
    }

    /// Current snapshot of the subscription of record, if any.
    pub fn current_state(&self) -> Option<SubscriptionState> {
        read_lock(&self.state).clone()
    }

    /// Phase of the pending operation.
    pub fn phase(&self) -> ReconcilePhase {
        *lock(&self.phase)
    }

    /// The purchase currently in flight, if any.
    pub fn pending_purchase(&self) -> Option<PendingPurchase> {
        lock(&self.pending).clone()
    }

    /// Whole days of trial remaining at `now`, if a trial is running.
    pub fn trial_days_remaining(&self, now: Timestamp) -> Option<i64> {
        self.current_state()?.trial_days_remaining(now)
    }

    /// Cold-start hydration from the local cache.
    ///
    /// Fills the snapshot for display before the first network round trip
    /// completes. Never clobbers a snapshot a sync already produced; cache
    /// misses and cache errors are non-fatal.
    pub async fn hydrate_from_cache(&self) -> Option<SubscriptionState> {
        let cached = match self.cache.load().await {
            Ok(cached) => cached?,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load subscription cache; starting cold");
                return None;
            }
        };

        let mut state = write_lock(&self.state);
        if state.is_none() {
            *state = Some(cached.clone());
        }
        Some(cached)
    }

    /// Refetches the subscription of record and replaces the snapshot
    /// wholesale, mirroring it to the local cache.
    pub async fn sync(&self) -> Result<SubscriptionState, ReconcileError> {
        let operation = OperationId::new();
        self.sync_inner(&operation).await
    }

    /// Requests a plan change.
    ///
    /// Validates the transition against the current snapshot, drives the
    /// store purchase, and on any settled outcome defers to the backend as
    /// ground truth. Returns to idle on every path.
    pub async fn select_plan(
        &self,
        target_plan: PlanCode,
        target_period: BillingPeriod,
    ) -> Result<SelectPlanOutcome, ReconcileError> {
        let operation = OperationId::new();
        let _guard = self.begin_operation()?;

        // Cold start: a plan change before the first sync resolves against
        // the backend, which is ground truth.
        let current = match self.current_state() {
            Some(state) => state,
            None => self.sync_inner(&operation).await?,
        };

        if current.source == SubscriptionSource::Promo {
            return Err(ReconcileError::PromoLocked);
        }
        if !current.is_mobile_user {
            return Err(ReconcileError::PlatformRestricted);
        }
        if current.is_active_plan(&target_plan, target_period) {
            return Err(ReconcileError::AlreadyActive);
        }
        // Unconditional business rule, independent of tier rank.
        if current.period == PlanPeriod::Yearly && target_period == BillingPeriod::Monthly {
            return Err(ReconcileError::DowngradeRestricted);
        }

        let product = self
            .catalog
            .purchasable_product(&target_plan, target_period, self.platform)
            .ok_or(ReconcileError::ProductUnavailable)?;
        let product_id = product
            .store_product_id
            .clone()
            .ok_or(ReconcileError::ProductUnavailable)?;

        self.set_phase(ReconcilePhase::PurchaseInFlight);
        *lock(&self.pending) = Some(PendingPurchase {
            target_plan_code: target_plan.clone(),
            target_period,
            store_product_id: product_id.clone(),
        });

        // Best-effort attribution; the backend refetch settles the truth
        // regardless.
        if let Err(e) = self.store.identify(&self.user_id).await {
            tracing::warn!(
                operation = %operation,
                error = %e,
                "Store identify failed; continuing with purchase"
            );
        }

        tracing::info!(
            operation = %operation,
            plan = %target_plan,
            period = %target_period,
            product = %product_id,
            "Starting store purchase"
        );

        match self.store.purchase(&product_id).await {
            Ok(PurchaseResult::Cancelled) => {
                self.set_phase(ReconcilePhase::Cancelled);
                tracing::info!(operation = %operation, "Purchase sheet dismissed by user");
                Ok(SelectPlanOutcome::Cancelled)
            }
            Err(e) => {
                self.set_phase(ReconcilePhase::Failed);
                tracing::warn!(operation = %operation, error = %e, "Store purchase failed");
                Err(ReconcileError::store_failure(e.to_string()))
            }
            Ok(PurchaseResult::Completed { entitlements }) => {
                if entitlements.is_empty() {
                    // Provisional success: entitlement propagation can lag
                    // the purchase call returning.
                    tracing::warn!(
                        operation = %operation,
                        "Purchase settled with empty entitlement set"
                    );
                }
                self.set_phase(ReconcilePhase::Settled);
                let state = self.sync_inner(&operation).await?;
                Ok(SelectPlanOutcome::Purchased(state))
            }
        }
    }

    /// Restores previous purchases.
    ///
    /// Allowed even for promo users as a safety net, but short-circuits to
    /// "nothing to restore" without a store call when already on promo.
    pub async fn restore_purchases(&self) -> Result<RestoreOutcome, ReconcileError> {
        let operation = OperationId::new();
        let _guard = self.begin_operation()?;

        let current = match self.current_state() {
            Some(state) => state,
            None => self.sync_inner(&operation).await?,
        };

        if !current.is_mobile_user {
            return Err(ReconcileError::PlatformRestricted);
        }
        if current.source == SubscriptionSource::Promo {
            return Ok(RestoreOutcome::NothingToRestore);
        }

        self.set_phase(ReconcilePhase::PurchaseInFlight);

        match self.store.restore().await {
            Err(e) => {
                self.set_phase(ReconcilePhase::Failed);
                tracing::warn!(operation = %operation, error = %e, "Store restore failed");
                Err(ReconcileError::store_failure(e.to_string()))
            }
            Ok(entitlements) if entitlements.is_empty() => {
                self.set_phase(ReconcilePhase::Cancelled);
                tracing::info!(operation = %operation, "Nothing to restore");
                Ok(RestoreOutcome::NothingToRestore)
            }
            Ok(entitlements) => {
                tracing::info!(
                    operation = %operation,
                    entitlements = entitlements.len(),
                    "Restore found active entitlements"
                );
                self.set_phase(ReconcilePhase::Settled);
                let state = self.sync_inner(&operation).await?;
                Ok(RestoreOutcome::Restored(state))
            }
        }
    }

    /// Application logout: severs the store identity (best-effort), clears
    /// the cache, and drops the snapshot.
    pub async fn logout(&self) {
        if let Err(e) = self.store.log_out().await {
            tracing::warn!(error = %e, "Store log_out failed");
        }
        if let Err(e) = self.cache.clear().await {
            tracing::warn!(error = %e, "Failed to clear subscription cache");
        }
        *write_lock(&self.state) = None;
        *lock(&self.pending) = None;
    }

    async fn sync_inner(
        &self,
        operation: &OperationId,
    ) -> Result<SubscriptionState, ReconcileError> {
        match self.backend.fetch_subscription(&self.user_id).await {
            Ok(state) => {
                *write_lock(&self.state) = Some(state.clone());
                // Cache is a passive mirror; a write failure must not fail
                // the sync.
                if let Err(e) = self.cache.store(&state).await {
                    tracing::warn!(
                        operation = %operation,
                        error = %e,
                        "Failed to mirror subscription state to cache"
                    );
                }
                tracing::debug!(
                    operation = %operation,
                    plan = %state.plan_code,
                    "Subscription state replaced from backend"
                );
                Ok(state)
            }
            Err(e) => {
                tracing::error!(operation = %operation, error = %e, "Backend sync failed");
                Err(ReconcileError::backend_sync_failure(e.to_string()))
            }
        }
    }

    fn begin_operation(&self) -> Result<FlightGuard<'_>, ReconcileError> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(ReconcileError::Busy);
        }
        Ok(FlightGuard { reconciler: self })
    }

    fn set_phase(&self, target: ReconcilePhase) {
        use crate::domain::foundation::StateMachine;
        let mut phase = lock(&self.phase);
        match phase.transition_to(target) {
            Ok(next) => *phase = next,
            Err(e) => tracing::error!(error = %e, "Illegal reconcile phase transition"),
        }
    }
}

/// Releases the single-flight slot and returns the machine to idle on every
/// exit path, early validation rejections included.
struct FlightGuard<'a> {
    reconciler: &'a EntitlementReconciler,
}

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        *lock(&self.reconciler.pending) = None;
        let mut phase = lock(&self.reconciler.phase);
        if *phase != ReconcilePhase::Idle {
            *phase = ReconcilePhase::Idle;
        }
        drop(phase);
        self.reconciler.in_flight.store(false, Ordering::Release);
    }
}

// Lock helpers that recover from poisoning instead of panicking; the guarded
// data is always left in a consistent state between awaits.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}

fn read_lock<T>(rwlock: &RwLock<T>) -> std::sync::RwLockReadGuard<'_, T> {
    rwlock.read().unwrap_or_else(|e| e.into_inner())
}

fn write_lock<T>(rwlock: &RwLock<T>) -> std::sync::RwLockWriteGuard<'_, T> {
    rwlock.write().unwrap_or_else(|e| e.into_inner())
}
