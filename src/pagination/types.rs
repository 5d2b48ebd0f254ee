//! Pagination types
//!
//! The query state carried from one page request to the next.

use crate::types::StringMap;
use serde::{Deserialize, Serialize};

/// Default field selection (every field)
pub const DEFAULT_FIELDS: &str = "*";

/// Default page size
pub const DEFAULT_LIMIT: u32 = 500;

/// Default ordering: most recently updated first
pub const DEFAULT_ORDER: &str = "updated_at:desc";

/// Query parameters for one page request.
///
/// Only `offset` changes during a run, and only forward: [`QueryState::advance`]
/// adds `limit` to it. Everything else is fixed when the run starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryState {
    /// Field selection expression
    pub fields: String,
    /// Maximum number of records per page
    pub limit: u32,
    /// Number of records to skip
    pub offset: u64,
    /// Ordering expression
    pub order: String,
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            fields: DEFAULT_FIELDS.to_string(),
            limit: DEFAULT_LIMIT,
            offset: 0,
            order: DEFAULT_ORDER.to_string(),
        }
    }
}

impl QueryState {
    /// Create a query state with the default parameters
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the field selection
    #[must_use]
    pub fn with_fields(mut self, fields: impl Into<String>) -> Self {
        self.fields = fields.into();
        self
    }

    /// Set the page size
    #[must_use]
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    /// Set the starting offset
    #[must_use]
    pub fn with_offset(mut self, offset: u64) -> Self {
        self.offset = offset;
        self
    }

    /// Set the ordering
    #[must_use]
    pub fn with_order(mut self, order: impl Into<String>) -> Self {
        self.order = order.into();
        self
    }

    /// Move to the next page
    pub fn advance(&mut self) {
        self.offset += u64::from(self.limit);
    }

    /// Whether a page of `records` records is smaller than a full page
    pub fn is_short_page(&self, records: usize) -> bool {
        records < self.limit as usize
    }

    /// Render as request query parameters
    pub fn to_params(&self) -> StringMap {
        let mut params = StringMap::new();
        params.insert("fields".to_string(), self.fields.clone());
        params.insert("limit".to_string(), self.limit.to_string());
        params.insert("offset".to_string(), self.offset.to_string());
        params.insert("order".to_string(), self.order.clone());
        params
    }
}
