//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the shell to its collaborators:
//! - `storage` - File and in-memory persistence
//! - `document` - Presentation marker holder
//! - `terminal` - Text screens, input parsing and the console loop

pub mod document;
pub mod storage;
pub mod terminal;

pub use document::MarkerDocument;
pub use storage::{FileStore, InMemoryStore};
pub use terminal::{Console, ConsoleScreens, TerminalScreens};
