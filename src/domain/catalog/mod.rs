//! Plan catalog domain module.
//!
//! Describes the plans available for purchase: tier ranks, per-platform
//! products, and presentation helpers.
//!
//! # Module Structure
//!
//! - `catalog` - PlanCatalog collection and the built-in default
//! - `gradient` - presentational gradient hints per tier rank
//! - `plan` - Plan and PlanCode
//! - `product` - Product, Platform, BillingPeriod, StoreProductId

#[allow(clippy::module_inception)]
mod catalog;
mod gradient;
mod plan;
mod product;

pub use catalog::PlanCatalog;
pub use gradient::{gradient_for_tier, TierGradient};
pub use plan::{Plan, PlanCode};
pub use product::{BillingPeriod, Platform, Product, StoreProductId};
