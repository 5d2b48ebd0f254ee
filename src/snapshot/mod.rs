//! Snapshot persistence
//!
//! Every fetched page is written to its own file before the next request is
//! issued. `SnapshotSink` is the seam the ingestion loop writes through;
//! `FsSnapshotWriter` is the filesystem implementation.

mod writer;

pub use writer::{snapshot_file_name, FsSnapshotWriter, SNAPSHOT_EXTENSION, SNAPSHOT_NAME_FORMAT};

use crate::error::Result;
use crate::types::Record;
use async_trait::async_trait;
use std::path::PathBuf;

/// Durable destination for pages
#[async_trait]
pub trait SnapshotSink: Send + Sync {
    /// Persist one page of `endpoint` and return where it went.
    ///
    /// Returning `Ok` means the page is fully written. Empty pages are
    /// written too.
    async fn write_page(&self, endpoint: &str, page: &[Record]) -> Result<PathBuf>;
}
