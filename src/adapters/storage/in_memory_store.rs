//! In-Memory Storage Adapter
//!
//! Stores preferences and history in memory. Used by the `memory` backend and
//! by tests, which can also inspect how often storage was read or written.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::shell::{SavedDecision, Theme, UserProfile};
use crate::ports::{DecisionHistory, PreferenceStore, StorageError};

#[derive(Debug, Default)]
struct Counters {
    reads: AtomicUsize,
    writes: AtomicUsize,
}

/// In-memory storage for preferences and decision history
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    profile: Arc<RwLock<Option<UserProfile>>>,
    theme: Arc<RwLock<Option<Theme>>>,
    history: Arc<RwLock<Vec<SavedDecision>>>,
    counters: Arc<Counters>,
    fail_writes: Arc<AtomicBool>,
}

impl InMemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store as if onboarding had already completed
    pub fn with_profile(profile: UserProfile) -> Self {
        Self {
            profile: Arc::new(RwLock::new(Some(profile))),
            ..Self::default()
        }
    }

    /// Pre-seed the stored theme
    pub fn seeded_theme(mut self, theme: Theme) -> Self {
        self.theme = Arc::new(RwLock::new(Some(theme)));
        self
    }

    /// Make every subsequent write fail with an IO error
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of reads served so far
    pub fn read_count(&self) -> usize {
        self.counters.reads.load(Ordering::SeqCst)
    }

    /// Number of successful writes so far
    pub fn write_count(&self) -> usize {
        self.counters.writes.load(Ordering::SeqCst)
    }

    /// Theme as stored, without the default applied
    pub async fn stored_theme(&self) -> Option<Theme> {
        *self.theme.read().await
    }

    fn record_read(&self) {
        self.counters.reads.fetch_add(1, Ordering::SeqCst);
    }

    fn begin_write(&self, key: &str) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::IoError(format!("write to {} rejected", key)));
        }
        self.counters.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[async_trait]
impl PreferenceStore for InMemoryStore {
    async fn get_profile(&self) -> Result<Option<UserProfile>, StorageError> {
        self.record_read();
        Ok(self.profile.read().await.clone())
    }

    async fn save_profile(&self, profile: &UserProfile) -> Result<(), StorageError> {
        self.begin_write("profile")?;
        *self.profile.write().await = Some(profile.clone());
        Ok(())
    }

    async fn get_theme(&self) -> Result<Theme, StorageError> {
        self.record_read();
        Ok(self.theme.read().await.unwrap_or_default())
    }

    async fn save_theme(&self, theme: Theme) -> Result<(), StorageError> {
        self.begin_write("theme")?;
        *self.theme.write().await = Some(theme);
        Ok(())
    }
}

#[async_trait]
impl DecisionHistory for InMemoryStore {
    async fn append(&self, entry: SavedDecision) -> Result<(), StorageError> {
        self.begin_write("history")?;
        self.history.write().await.push(entry);
        Ok(())
    }

    async fn list(&self) -> Result<Vec<SavedDecision>, StorageError> {
        self.record_read();
        Ok(self.history.read().await.iter().rev().cloned().collect())
    }

    async fn clear(&self) -> Result<(), StorageError> {
        self.begin_write("history")?;
        self.history.write().await.clear();
        Ok(())
    }
}
