//! Decision History Port - decisions the user chose to keep.
//!
//! Written by the result screen's save action and read by the history screen.
//! The shell never touches it.

use async_trait::async_trait;

use crate::domain::shell::SavedDecision;

use super::StorageError;

#[async_trait]
pub trait DecisionHistory: Send + Sync {
    /// Append a saved decision.
    async fn append(&self, entry: SavedDecision) -> Result<(), StorageError>;

    /// All saved decisions, newest first.
    async fn list(&self) -> Result<Vec<SavedDecision>, StorageError>;

    /// Remove every saved decision.
    async fn clear(&self) -> Result<(), StorageError>;
}
