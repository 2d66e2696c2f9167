//! Shell module - routing vocabulary and session state.
//!
//! # Domain Invariants
//!
//! 1. Exactly one view key is active at a time
//! 2. Unknown view keys can be stored but always render as home
//! 3. At most one alert is visible; a new one replaces the old
//! 4. Profile and decision records are opaque to the shell

mod alert;
mod events;
mod records;
mod state;
mod theme;
mod view;

pub use alert::{Alert, AlertKind};
pub use events::ShellEvent;
pub use records::{DecisionData, SavedDecision, UserProfile};
pub use state::SessionState;
pub use theme::{Theme, DARK_MARKER};
pub use view::{Resolved, View, ViewKey};
