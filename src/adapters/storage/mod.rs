//! Storage Adapters
//!
//! Implementations of the `PreferenceStore` and `DecisionHistory` ports.
//!
//! ## Available Adapters
//!
//! - **FileStore** - Stores each value as a YAML file in a data directory
//! - **InMemoryStore** - Stores values in memory (testing/ephemeral sessions)
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::{FileStore, InMemoryStore};
//!
//! // Persistent: file-based storage
//! let store = FileStore::new("./data");
//!
//! // Ephemeral: in-memory storage
//! let store = InMemoryStore::new();
//! ```

mod file_store;
mod in_memory_store;

pub use file_store::FileStore;
pub use in_memory_store::InMemoryStore;
