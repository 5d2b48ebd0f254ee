//! Checkpoint store implementation
//!
//! Provides file-based checkpoint persistence with atomic writes.

use super::types::Checkpoint;
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Store for persisting and loading crawl checkpoints
#[derive(Debug)]
pub struct CheckpointStore {
    /// Path to the checkpoint file
    path: PathBuf,
    /// Current checkpoint (cached)
    state: Arc<RwLock<Checkpoint>>,
}

impl CheckpointStore {
    /// Create an empty store that saves to `path`
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            state: Arc::new(RwLock::new(Checkpoint::new())),
        }
    }

    /// Create an in-memory store (no file persistence)
    pub fn in_memory() -> Self {
        Self {
            path: PathBuf::new(),
            state: Arc::new(RwLock::new(Checkpoint::new())),
        }
    }

    /// Create a store from a file, loading an existing checkpoint if present
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let state = if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .map_err(|e| Error::checkpoint(format!("Failed to read checkpoint file: {e}")))?;
            serde_json::from_str(&contents)
                .map_err(|e| Error::checkpoint(format!("Failed to parse checkpoint file: {e}")))?
        } else {
            Checkpoint::new()
        };

        Ok(Self {
            path,
            state: Arc::new(RwLock::new(state)),
        })
    }

    /// Save the current checkpoint to file
    pub async fn save(&self) -> Result<()> {
        if self.is_in_memory() {
            return Ok(());
        }

        let state = self.state.read().await;
        let contents = serde_json::to_string_pretty(&*state)
            .map_err(|e| Error::checkpoint(format!("Failed to serialize checkpoint: {e}")))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                Error::checkpoint(format!("Failed to create checkpoint directory: {e}"))
            })?;
        }

        // Write to temp file first, then rename for atomicity
        let temp_path = self.path.with_extension("tmp");
        tokio::fs::write(&temp_path, &contents)
            .await
            .map_err(|e| Error::checkpoint(format!("Failed to write checkpoint file: {e}")))?;

        tokio::fs::rename(&temp_path, &self.path)
            .await
            .map_err(|e| Error::checkpoint(format!("Failed to rename checkpoint file: {e}")))?;

        Ok(())
    }

    /// Get a read lock on the current checkpoint
    pub async fn state(&self) -> tokio::sync::RwLockReadGuard<'_, Checkpoint> {
        self.state.read().await
    }

    /// Offset to resume `endpoint` from, if a crawl was interrupted
    pub async fn next_offset(&self, endpoint: &str) -> Option<u64> {
        self.state().await.next_offset(endpoint)
    }

    /// Record a persisted page and save
    pub async fn record_page(&self, endpoint: &str, next_offset: u64) -> Result<()> {
        {
            let mut state = self.state.write().await;
            state.record_page(endpoint, next_offset);
        }
        self.save().await
    }

    /// Forget `endpoint` (its crawl completed) and save
    pub async fn clear(&self, endpoint: &str) -> Result<()> {
        let removed = {
            let mut state = self.state.write().await;
            state.clear(endpoint).is_some()
        };

        if removed {
            self.save().await?;
        }
        Ok(())
    }

    /// Get the checkpoint file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check if using in-memory mode
    pub fn is_in_memory(&self) -> bool {
        self.path.as_os_str().is_empty()
    }
}

impl Clone for CheckpointStore {
    fn clone(&self) -> Self {
        Self {
            path: self.path.clone(),
            state: Arc::clone(&self.state),
        }
    }
}
