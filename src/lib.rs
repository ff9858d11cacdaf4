//! Renewly Core - Subscription and Entitlement Reconciliation
//!
//! This crate keeps three independent sources of subscription truth mutually
//! consistent for the Renewly mobile client: the locally cached subscription
//! record, the device store's entitlements, and the backend's
//! subscription-of-record. It is invoked from UI event handlers in the
//! embedding shell; there is no process entry point of its own.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
