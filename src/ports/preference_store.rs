//! Preference Store Port - persisted profile and theme.
//!
//! This is the storage contract the shell consumes. Profile and theme are the
//! only values the shell itself reads or writes; the persistence medium and
//! serialization belong to the adapter.

use async_trait::async_trait;

use crate::domain::shell::{Theme, UserProfile};

/// Errors that can occur during storage operations
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Failed to serialize {key}: {reason}")]
    SerializationFailed { key: String, reason: String },

    #[error("Failed to deserialize {key}: {reason}")]
    DeserializationFailed { key: String, reason: String },

    #[error("IO error: {0}")]
    IoError(String),
}

/// Port for persisted user preferences.
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    /// Load the stored profile, if onboarding has ever completed.
    async fn get_profile(&self) -> Result<Option<UserProfile>, StorageError>;

    /// Persist the profile, replacing any previous one.
    async fn save_profile(&self, profile: &UserProfile) -> Result<(), StorageError>;

    /// Load the stored theme.
    ///
    /// Returns the default theme when nothing has been stored yet.
    async fn get_theme(&self) -> Result<Theme, StorageError>;

    /// Persist the theme.
    async fn save_theme(&self, theme: Theme) -> Result<(), StorageError>;
}
