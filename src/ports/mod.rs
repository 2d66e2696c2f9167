//! Ports - Interfaces for external collaborators.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the shell and the outside world. Adapters implement these ports.
//!
//! - `PreferenceStore` - Persisted profile and theme
//! - `DecisionHistory` - Decisions saved by the result screen
//! - `DocumentRoot` - Presentation markers (the dark theme marker)
//! - `ScreenRenderer` - The screens the shell routes between

mod decision_history;
mod document_root;
mod preference_store;
mod screen_renderer;

pub use decision_history::DecisionHistory;
pub use document_root::DocumentRoot;
pub use preference_store::{PreferenceStore, StorageError};
pub use screen_renderer::{Frame, RenderError, ScreenRenderer};
