//! Foundation value objects shared across the domain.
//!
//! # Module Structure
//!
//! - `errors` - ValidationError, ErrorCode, DomainError
//! - `ids` - UserId, OperationId
//! - `state_machine` - StateMachine trait for lifecycle enums
//! - `timestamp` - Timestamp value object

mod errors;
mod ids;
mod state_machine;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{OperationId, UserId};
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
