//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, and error types used across the
//! shell and boundary modules.

mod errors;
mod ids;
mod state_machine;
mod timestamp;

pub use errors::ValidationError;
pub use ids::DecisionId;
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
