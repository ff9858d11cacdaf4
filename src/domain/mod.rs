//! Domain layer: value objects and business rules, free of I/O.

pub mod catalog;
pub mod foundation;
pub mod subscription;
