//! Pagination module
//!
//! Offset pagination over a newest-first listing.
//!
//! # Overview
//!
//! - `QueryState` - the fields/limit/offset/order parameters sent with each page
//! - `RecencyHorizon` - the "now minus delay" cut-off fixed at run start
//! - `check_stop` - the two-signal stop condition (short page, or horizon reached)

mod stop;
mod types;

pub use stop::{
    check_stop, fallback_timestamp, page_timestamp, parse_timestamp, PageTimestamp,
    RecencyHorizon, StopReason, MISSING_TIMESTAMP_AGE_DAYS,
};
pub use types::{QueryState, DEFAULT_FIELDS, DEFAULT_LIMIT, DEFAULT_ORDER};
