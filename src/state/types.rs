//! Checkpoint types for resumable crawls
//!
//! These types are serialized to JSON and persisted between runs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Checkpoint for every endpoint crawled with resume enabled
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    /// Per-endpoint progress
    #[serde(default)]
    pub endpoints: HashMap<String, EndpointCheckpoint>,
}

impl Checkpoint {
    /// Create a new empty checkpoint
    pub fn new() -> Self {
        Self::default()
    }

    /// Progress for an endpoint
    pub fn get(&self, endpoint: &str) -> Option<&EndpointCheckpoint> {
        self.endpoints.get(endpoint)
    }

    /// Offset to resume `endpoint` from
    pub fn next_offset(&self, endpoint: &str) -> Option<u64> {
        self.endpoints.get(endpoint).map(|e| e.next_offset)
    }

    /// Record that a page was persisted and the crawl continues at `next_offset`
    pub fn record_page(&mut self, endpoint: &str, next_offset: u64) {
        let entry = self
            .endpoints
            .entry(endpoint.to_string())
            .or_insert_with(EndpointCheckpoint::new);
        entry.next_offset = next_offset;
        entry.pages_persisted += 1;
        entry.updated_at = Utc::now();
    }

    /// Forget an endpoint's progress
    pub fn clear(&mut self, endpoint: &str) -> Option<EndpointCheckpoint> {
        self.endpoints.remove(endpoint)
    }
}

/// Progress of one interrupted crawl
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndpointCheckpoint {
    /// Offset of the first page not yet persisted
    pub next_offset: u64,
    /// Pages persisted since the crawl started
    #[serde(default)]
    pub pages_persisted: u64,
    /// When this entry was last updated
    pub updated_at: DateTime<Utc>,
}

impl EndpointCheckpoint {
    /// Fresh entry at offset zero
    pub fn new() -> Self {
        Self {
            next_offset: 0,
            pages_persisted: 0,
            updated_at: Utc::now(),
        }
    }
}

impl Default for EndpointCheckpoint {
    fn default() -> Self {
        Self::new()
    }
}
