//! Filesystem snapshot writer
//!
//! Each page becomes `<root>/<endpoint>/<YYYYmmdd_HHMMSS.micros>.json`.
//! Files are written to a `.tmp` sibling, synced, then renamed into place,
//! so a reader never sees a partial snapshot.

use super::SnapshotSink;
use crate::error::{Error, Result};
use crate::types::Record;
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tokio::io::AsyncWriteExt;
use tracing::debug;

/// Snapshot file name format (UTC, microsecond precision)
pub const SNAPSHOT_NAME_FORMAT: &str = "%Y%m%d_%H%M%S%.6f";

/// Snapshot file extension
pub const SNAPSHOT_EXTENSION: &str = "json";

/// File name for a snapshot taken at `at`
pub fn snapshot_file_name(at: DateTime<Utc>) -> String {
    format!("{}.{SNAPSHOT_EXTENSION}", at.format(SNAPSHOT_NAME_FORMAT))
}

/// Writes pages as JSON array files under a root directory
#[derive(Debug)]
pub struct FsSnapshotWriter {
    /// Snapshot root; endpoint directories live below it
    root: PathBuf,
    /// Timestamp of the last name handed out by this writer
    last_stamp: Mutex<Option<DateTime<Utc>>>,
}

impl FsSnapshotWriter {
    /// Create a writer rooted at `root`
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            last_stamp: Mutex::new(None),
        }
    }

    /// Snapshot root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding snapshots of `endpoint`
    pub fn endpoint_dir(&self, endpoint: &str) -> PathBuf {
        self.root.join(endpoint)
    }

    /// Create the endpoint directory (and parents) if missing
    pub async fn ensure_endpoint_dir(&self, endpoint: &str) -> Result<PathBuf> {
        let dir = self.endpoint_dir(endpoint);
        tokio::fs::create_dir_all(&dir).await.map_err(|e| {
            Error::snapshot(format!("Failed to create {}: {e}", dir.display()))
        })?;
        Ok(dir)
    }

    /// Next strictly increasing timestamp for a file name.
    ///
    /// Wall-clock time, bumped by one microsecond when the clock has not
    /// moved past the previous name.
    fn next_stamp(&self) -> DateTime<Utc> {
        let now = Utc::now();
        let mut last = self
            .last_stamp
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);

        let stamp = match *last {
            Some(prev) if now <= prev => prev + Duration::microseconds(1),
            _ => now,
        };
        *last = Some(stamp);
        stamp
    }
}

#[async_trait]
impl SnapshotSink for FsSnapshotWriter {
    async fn write_page(&self, endpoint: &str, page: &[Record]) -> Result<PathBuf> {
        let dir = self.ensure_endpoint_dir(endpoint).await?;
        let path = dir.join(snapshot_file_name(self.next_stamp()));

        if tokio::fs::try_exists(&path).await? {
            return Err(Error::snapshot(format!(
                "Refusing to overwrite existing snapshot {}",
                path.display()
            )));
        }

        let contents = serde_json::to_vec(page)?;
        let temp_path = path.with_extension(format!("{SNAPSHOT_EXTENSION}.tmp"));

        persist(&temp_path, &path, &contents).await?;

        debug!(
            path = %path.display(),
            records = page.len(),
            bytes = contents.len(),
            "Snapshot written"
        );
        Ok(path)
    }
}

/// Write `contents` to `path` through `temp_path`.
///
/// On failure the temp file is removed so no partial sibling is left behind.
pub(super) async fn persist(temp_path: &Path, path: &Path, contents: &[u8]) -> Result<()> {
    let result = write_durably(temp_path, path, contents).await;
    if result.is_err() {
        let _ = tokio::fs::remove_file(temp_path).await;
    }
    result
}

async fn write_durably(temp_path: &Path, path: &Path, contents: &[u8]) -> Result<()> {
    let mut file = tokio::fs::File::create(temp_path).await.map_err(|e| {
        Error::snapshot(format!("Failed to create {}: {e}", temp_path.display()))
    })?;
    file.write_all(contents).await.map_err(|e| {
        Error::snapshot(format!("Failed to write {}: {e}", temp_path.display()))
    })?;
    file.sync_all().await.map_err(|e| {
        Error::snapshot(format!("Failed to sync {}: {e}", temp_path.display()))
    })?;
    drop(file);

    tokio::fs::rename(temp_path, path).await.map_err(|e| {
        Error::snapshot(format!("Failed to finalize {}: {e}", path.display()))
    })
}
