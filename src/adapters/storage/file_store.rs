//! File-based Storage Adapter
//!
//! Stores each persisted value as a YAML file inside one data directory:
//!
//! ```text
//! {base_path}/profile.yaml
//! {base_path}/theme.yaml
//! {base_path}/history.yaml
//! ```

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, warn};

use crate::domain::shell::{SavedDecision, Theme, UserProfile};
use crate::ports::{DecisionHistory, PreferenceStore, StorageError};

const PROFILE_KEY: &str = "profile";
const THEME_KEY: &str = "theme";
const HISTORY_KEY: &str = "history";

/// File-based storage for preferences and decision history
#[derive(Debug, Clone)]
pub struct FileStore {
    base_path: PathBuf,
}

impl FileStore {
    /// Create a new file store rooted at `base_path`
    ///
    /// The directory is created lazily on first write.
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Get the file path for a stored key
    fn key_path(&self, key: &str) -> PathBuf {
        self.base_path.join(format!("{}.yaml", key))
    }

    async fn ensure_dir(&self) -> Result<(), StorageError> {
        fs::create_dir_all(&self.base_path)
            .await
            .map_err(|e| StorageError::IoError(format!("Failed to create directory: {}", e)))
    }

    /// Read a key's raw contents; `None` if it was never written
    async fn read_raw(&self, key: &str) -> Result<Option<String>, StorageError> {
        let file_path = self.key_path(key);

        if !file_path.exists() {
            return Ok(None);
        }

        fs::read_to_string(&file_path)
            .await
            .map(Some)
            .map_err(|e| StorageError::IoError(format!("Failed to read {}: {}", key, e)))
    }

    async fn read<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        let Some(yaml) = self.read_raw(key).await? else {
            return Ok(None);
        };

        serde_yaml::from_str(&yaml)
            .map(Some)
            .map_err(|e| StorageError::DeserializationFailed {
                key: key.to_string(),
                reason: e.to_string(),
            })
    }

    async fn write<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        self.ensure_dir().await?;

        let yaml = serde_yaml::to_string(value).map_err(|e| StorageError::SerializationFailed {
            key: key.to_string(),
            reason: e.to_string(),
        })?;

        // Write to a temporary file, then rename over the target (atomic on Unix)
        let file_path = self.key_path(key);
        let temp_path = file_path.with_extension("tmp");
        fs::write(&temp_path, yaml)
            .await
            .map_err(|e| StorageError::IoError(format!("Failed to write temporary file: {}", e)))?;
        fs::rename(&temp_path, &file_path)
            .await
            .map_err(|e| StorageError::IoError(format!("Failed to rename file: {}", e)))?;

        debug!(key, path = %file_path.display(), "stored value");
        Ok(())
    }
}

#[async_trait]
impl PreferenceStore for FileStore {
    async fn get_profile(&self) -> Result<Option<UserProfile>, StorageError> {
        self.read(PROFILE_KEY).await
    }

    async fn save_profile(&self, profile: &UserProfile) -> Result<(), StorageError> {
        self.write(PROFILE_KEY, profile).await
    }

    async fn get_theme(&self) -> Result<Theme, StorageError> {
        match self.read::<Theme>(THEME_KEY).await {
            Ok(theme) => Ok(theme.unwrap_or_default()),
            Err(StorageError::DeserializationFailed { reason, .. }) => {
                warn!(%reason, "stored theme is unreadable, using default");
                Ok(Theme::default())
            }
            Err(e) => Err(e),
        }
    }

    async fn save_theme(&self, theme: Theme) -> Result<(), StorageError> {
        self.write(THEME_KEY, &theme).await
    }
}

#[async_trait]
impl DecisionHistory for FileStore {
    async fn append(&self, entry: SavedDecision) -> Result<(), StorageError> {
        let mut entries: Vec<SavedDecision> = self.read(HISTORY_KEY).await?.unwrap_or_default();
        entries.push(entry);
        self.write(HISTORY_KEY, &entries).await
    }

    async fn list(&self) -> Result<Vec<SavedDecision>, StorageError> {
        let mut entries: Vec<SavedDecision> = self.read(HISTORY_KEY).await?.unwrap_or_default();
        // Stored oldest first
        entries.reverse();
        Ok(entries)
    }

    async fn clear(&self) -> Result<(), StorageError> {
        let file_path = self.key_path(HISTORY_KEY);

        if file_path.exists() {
            fs::remove_file(&file_path)
                .await
                .map_err(|e| StorageError::IoError(format!("Failed to delete history: {}", e)))?;
        }

        Ok(())
    }
}
