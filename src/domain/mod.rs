//! Domain layer containing the shell's types and rules.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors, state machine)
//! - `shell` - Views, theme, alerts, opaque records and session state
//! - `boundary` - Error boundary status and fallback notice

pub mod boundary;
pub mod foundation;
pub mod shell;
