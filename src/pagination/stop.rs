//! Stop condition evaluation
//!
//! A crawl ends when either the API runs out of data (a short page) or the
//! newest-first ordering has walked back past the recency horizon.

use super::types::QueryState;
use crate::types::{JsonValue, Record};
use chrono::{DateTime, Duration, Utc};
use std::fmt;
use tracing::warn;

/// Age assigned to a page whose last record has no usable update timestamp.
///
/// Delays are validated to be strictly below this, so the fallback always
/// lands behind the horizon.
pub const MISSING_TIMESTAMP_AGE_DAYS: u32 = 36_525;

/// Cut-off for the crawl: records updated before this are old enough to stop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecencyHorizon {
    at: DateTime<Utc>,
}

impl RecencyHorizon {
    /// Horizon `delay_days` before `now`
    pub fn from_delay(now: DateTime<Utc>, delay_days: u32) -> Self {
        Self::at(now - Duration::days(i64::from(delay_days)))
    }

    /// Horizon at an explicit instant
    pub fn at(at: DateTime<Utc>) -> Self {
        Self { at }
    }

    /// The cut-off instant
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.at
    }

    /// Whether `ts` is strictly older than the horizon
    pub fn is_passed_by(&self, ts: DateTime<Utc>) -> bool {
        ts < self.at
    }
}

/// Latest update time of a page, as read from its last record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageTimestamp {
    /// Read from the record's update-time field
    Field(DateTime<Utc>),
    /// The field was missing or unparsable; substituted fallback
    Fallback(DateTime<Utc>),
}

impl PageTimestamp {
    /// The timestamp value regardless of origin
    pub fn value(&self) -> DateTime<Utc> {
        match self {
            PageTimestamp::Field(ts) | PageTimestamp::Fallback(ts) => *ts,
        }
    }

    /// Whether the fallback was used
    pub fn is_fallback(&self) -> bool {
        matches!(self, PageTimestamp::Fallback(_))
    }
}

/// Why the ingestion loop stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The page held fewer records than the limit
    ShortPage {
        /// Records in the final page
        records: usize,
        /// Configured page size
        limit: u32,
    },
    /// The page's latest update is older than the horizon
    ReachedHorizon {
        /// Latest update seen on the final page
        latest: DateTime<Utc>,
        /// Recency horizon of the run
        horizon: DateTime<Utc>,
    },
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopReason::ShortPage { records, limit } => {
                write!(f, "short page ({records} < {limit} records)")
            }
            StopReason::ReachedHorizon { latest, horizon } => {
                write!(
                    f,
                    "reached horizon (latest update {latest} older than {horizon})"
                )
            }
        }
    }
}

/// Fallback timestamp for records without a usable update time
pub fn fallback_timestamp(now: DateTime<Utc>) -> DateTime<Utc> {
    now - Duration::days(i64::from(MISSING_TIMESTAMP_AGE_DAYS))
}

/// Parse a Unix-seconds timestamp from an integer, float or numeric string
pub fn parse_timestamp(value: &JsonValue) -> Option<DateTime<Utc>> {
    let secs = match value {
        JsonValue::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64))?,
        JsonValue::String(s) => s.trim().parse::<i64>().ok()?,
        _ => return None,
    };
    DateTime::from_timestamp(secs, 0)
}

/// Latest update time of a page, taken from the *last* record.
///
/// Returns `None` for an empty page. A last record without a parsable
/// `field` yields [`PageTimestamp::Fallback`] and a warning, never an error.
pub fn page_timestamp(page: &[Record], field: &str, now: DateTime<Utc>) -> Option<PageTimestamp> {
    let last = page.last()?;

    match last.get(field).and_then(parse_timestamp) {
        Some(ts) => Some(PageTimestamp::Field(ts)),
        None => {
            let keys: Vec<&str> = last.keys().map(String::as_str).collect();
            warn!(
                field,
                raw = ?last.get(field),
                keys = ?keys,
                "Last record has no usable update timestamp, treating page as old"
            );
            Some(PageTimestamp::Fallback(fallback_timestamp(now)))
        }
    }
}

/// Decide whether the crawl is done after a page.
///
/// Short page is checked first, so when both conditions hold the reported
/// reason is [`StopReason::ShortPage`].
pub fn check_stop(
    query: &QueryState,
    records: usize,
    latest: Option<PageTimestamp>,
    horizon: &RecencyHorizon,
) -> Option<StopReason> {
    if query.is_short_page(records) {
        return Some(StopReason::ShortPage {
            records,
            limit: query.limit,
        });
    }

    match latest {
        Some(ts) if horizon.is_passed_by(ts.value()) => Some(StopReason::ReachedHorizon {
            latest: ts.value(),
            horizon: horizon.timestamp(),
        }),
        _ => None,
    }
}
