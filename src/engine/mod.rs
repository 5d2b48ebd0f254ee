//! Ingestion engine
//!
//! The incremental crawl loop.
//!
//! # Overview
//!
//! Each iteration fetches one page, persists it (even when empty), reads the
//! update timestamp of the page's last record and evaluates the stop
//! condition:
//!
//! - a page shorter than `limit` means the API has no more data
//! - a timestamp older than the recency horizon means the newest-first
//!   listing has gone back far enough
//!
//! Otherwise the offset advances by `limit` and the loop continues. Any
//! fetch or write error ends the run; at most the page in flight is lost.

mod types;

pub use types::{IngestReport, IngestStats};

use crate::config::IngestConfig;
use crate::error::Result;
use crate::fetch::PageFetcher;
use crate::pagination::{check_stop, page_timestamp, RecencyHorizon};
use crate::snapshot::SnapshotSink;
use crate::state::CheckpointStore;
use chrono::{DateTime, Utc};
use std::time::Instant;
use tracing::{debug, info};

/// Run one crawl of `config.endpoint` starting now.
///
/// With a checkpoint store, the crawl resumes from the stored offset, records
/// progress after each page and clears the entry on completion.
pub async fn run(
    fetcher: &dyn PageFetcher,
    sink: &dyn SnapshotSink,
    config: &IngestConfig,
    checkpoint: Option<&CheckpointStore>,
) -> Result<IngestReport> {
    run_at(fetcher, sink, config, checkpoint, Utc::now()).await
}

/// Run one crawl with an explicit start time (fixes the recency horizon)
pub async fn run_at(
    fetcher: &dyn PageFetcher,
    sink: &dyn SnapshotSink,
    config: &IngestConfig,
    checkpoint: Option<&CheckpointStore>,
    now: DateTime<Utc>,
) -> Result<IngestReport> {
    let start = Instant::now();
    let endpoint = config.endpoint.as_str();
    let horizon = RecencyHorizon::from_delay(now, config.delay_days);

    let mut query = config.query.clone();
    if let Some(store) = checkpoint {
        if let Some(offset) = store.next_offset(endpoint).await {
            info!(endpoint, offset, "Resuming from checkpoint");
            query.offset = offset;
        }
    }
    let start_offset = query.offset;

    info!(
        endpoint,
        offset = query.offset,
        limit = query.limit,
        horizon = %horizon.timestamp(),
        "Starting ingestion loop"
    );

    let mut stats = IngestStats::new();
    let mut snapshots = Vec::new();

    let stop_reason = loop {
        debug!(endpoint, offset = query.offset, "Fetching page");
        let page = fetcher.fetch_page(endpoint, &query).await?;

        let path = sink.write_page(endpoint, &page).await?;
        stats.add_page(page.len());

        let latest = page_timestamp(&page, &config.timestamp_field, now);
        if latest.is_some_and(|ts| ts.is_fallback()) {
            stats.add_fallback();
        }

        info!(
            endpoint,
            page = stats.pages_fetched,
            offset = query.offset,
            records = page.len(),
            latest = ?latest.map(|ts| ts.value()),
            snapshot = %path.display(),
            "Page persisted"
        );
        snapshots.push(path);

        if let Some(reason) = check_stop(&query, page.len(), latest, &horizon) {
            break reason;
        }

        query.advance();
        if let Some(store) = checkpoint {
            store.record_page(endpoint, query.offset).await?;
        }
    };

    if let Some(store) = checkpoint {
        store.clear(endpoint).await?;
    }

    stats.set_duration(start.elapsed().as_millis() as u64);

    info!(
        endpoint,
        pages = stats.pages_fetched,
        records = stats.records_persisted,
        reason = %stop_reason,
        "Ingestion loop finished"
    );

    Ok(IngestReport {
        endpoint: endpoint.to_string(),
        start_offset,
        final_offset: query.offset,
        horizon: horizon.timestamp(),
        stop_reason,
        snapshots,
        stats,
    })
}
