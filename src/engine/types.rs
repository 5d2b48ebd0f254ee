//! Engine types
//!
//! Statistics and the report returned from a run.

use crate::pagination::StopReason;
use chrono::{DateTime, Utc};
use std::path::PathBuf;

/// Statistics from an ingestion run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestStats {
    /// Pages fetched (and persisted)
    pub pages_fetched: usize,
    /// Records persisted across all pages
    pub records_persisted: usize,
    /// Pages whose last record had no usable update timestamp
    pub fallback_timestamps: usize,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

impl IngestStats {
    /// Create new stats
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a persisted page of `records` records
    pub fn add_page(&mut self, records: usize) {
        self.pages_fetched += 1;
        self.records_persisted += records;
    }

    /// Count a fallback timestamp
    pub fn add_fallback(&mut self) {
        self.fallback_timestamps += 1;
    }

    /// Set duration
    pub fn set_duration(&mut self, ms: u64) {
        self.duration_ms = ms;
    }
}

/// Outcome of a completed run
#[derive(Debug, Clone)]
pub struct IngestReport {
    /// Endpoint crawled
    pub endpoint: String,
    /// Offset of the first page
    pub start_offset: u64,
    /// Offset of the last page
    pub final_offset: u64,
    /// Recency horizon used for the run
    pub horizon: DateTime<Utc>,
    /// Why the loop stopped
    pub stop_reason: StopReason,
    /// Snapshot files in the order they were written
    pub snapshots: Vec<PathBuf>,
    /// Counters
    pub stats: IngestStats,
}

impl IngestReport {
    /// Number of loop iterations (one page each)
    pub fn iterations(&self) -> usize {
        self.stats.pages_fetched
    }
}
