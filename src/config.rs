//! Run configuration
//!
//! Immutable, validated configuration for the API connection and for a
//! single ingestion run. Both are assembled through builders and checked in
//! `build()`, so the ingestion loop never sees an invalid combination.

use crate::error::{Error, Result};
use crate::pagination::{QueryState, MISSING_TIMESTAMP_AGE_DAYS};
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// IGDB v4 API root
pub const DEFAULT_BASE_URL: &str = "https://api.igdb.com/v4";

/// Twitch OAuth2 token endpoint
pub const DEFAULT_TOKEN_URL: &str = "https://id.twitch.tv/oauth2/token";

/// Field holding each record's last update time (Unix seconds)
pub const DEFAULT_TIMESTAMP_FIELD: &str = "updated_at";

/// Directory that receives `<endpoint>/<timestamp>.json` snapshots
pub const DEFAULT_SNAPSHOT_ROOT: &str = "./json";

// ============================================================================
// API Config
// ============================================================================

/// Where and how to reach the API
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL that endpoint names are appended to
    pub base_url: String,
    /// OAuth2 client-credentials token endpoint
    pub token_url: String,
    /// Per-request timeout; `None` waits indefinitely
    pub timeout: Option<Duration>,
    /// User agent string
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
            timeout: None,
            user_agent: format!("igdb-ingest/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ApiConfig {
    /// Create a new config builder
    pub fn builder() -> ApiConfigBuilder {
        ApiConfigBuilder::default()
    }
}

/// Builder for [`ApiConfig`]
#[derive(Debug, Default)]
pub struct ApiConfigBuilder {
    config: ApiConfig,
}

impl ApiConfigBuilder {
    /// Set the API base URL
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Set the token endpoint URL
    #[must_use]
    pub fn token_url(mut self, url: impl Into<String>) -> Self {
        self.config.token_url = url.into();
        self
    }

    /// Set a request timeout
    #[must_use]
    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the user agent
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Validate and build the config
    pub fn build(self) -> Result<ApiConfig> {
        Url::parse(&self.config.base_url)?;
        Url::parse(&self.config.token_url)?;
        if self.config.timeout == Some(Duration::ZERO) {
            return Err(Error::invalid_value("timeout", "must be greater than zero"));
        }
        Ok(self.config)
    }
}

// ============================================================================
// Ingest Config
// ============================================================================

/// Everything one ingestion run needs, fixed for its whole duration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestConfig {
    /// API resource to crawl (e.g. `games`)
    pub endpoint: String,
    /// Recency horizon in days before the run start
    pub delay_days: u32,
    /// Initial query parameters
    pub query: QueryState,
    /// Record field holding the update timestamp
    pub timestamp_field: String,
    /// Root directory for snapshots
    pub snapshot_root: PathBuf,
    /// Checkpoint file; `None` disables resume
    pub checkpoint: Option<PathBuf>,
}

impl IngestConfig {
    /// Start building a config for `endpoint`
    pub fn builder(endpoint: impl Into<String>) -> IngestConfigBuilder {
        IngestConfigBuilder::new(endpoint)
    }

    /// Directory that receives this run's snapshots
    pub fn endpoint_dir(&self) -> PathBuf {
        self.snapshot_root.join(&self.endpoint)
    }
}

/// Builder for [`IngestConfig`]
#[derive(Debug)]
pub struct IngestConfigBuilder {
    endpoint: String,
    delay_days: Option<u32>,
    query: QueryState,
    timestamp_field: String,
    snapshot_root: PathBuf,
    checkpoint: Option<PathBuf>,
}

impl IngestConfigBuilder {
    fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            delay_days: None,
            query: QueryState::default(),
            timestamp_field: DEFAULT_TIMESTAMP_FIELD.to_string(),
            snapshot_root: PathBuf::from(DEFAULT_SNAPSHOT_ROOT),
            checkpoint: None,
        }
    }

    /// Set the recency horizon in days (required)
    #[must_use]
    pub fn delay_days(mut self, days: u32) -> Self {
        self.delay_days = Some(days);
        self
    }

    /// Set the field selection
    #[must_use]
    pub fn fields(mut self, fields: impl Into<String>) -> Self {
        self.query.fields = fields.into();
        self
    }

    /// Set the page size
    #[must_use]
    pub fn limit(mut self, limit: u32) -> Self {
        self.query.limit = limit;
        self
    }

    /// Set the ordering
    #[must_use]
    pub fn order(mut self, order: impl Into<String>) -> Self {
        self.query.order = order.into();
        self
    }

    /// Set the offset of the first page
    #[must_use]
    pub fn start_offset(mut self, offset: u64) -> Self {
        self.query.offset = offset;
        self
    }

    /// Set the update timestamp field
    #[must_use]
    pub fn timestamp_field(mut self, field: impl Into<String>) -> Self {
        self.timestamp_field = field.into();
        self
    }

    /// Set the snapshot root directory
    #[must_use]
    pub fn snapshot_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.snapshot_root = root.into();
        self
    }

    /// Enable checkpointing to `path`
    #[must_use]
    pub fn checkpoint(mut self, path: impl Into<PathBuf>) -> Self {
        self.checkpoint = Some(path.into());
        self
    }

    /// Validate and build the config
    pub fn build(self) -> Result<IngestConfig> {
        validate_endpoint(&self.endpoint)?;

        let delay_days = self.delay_days.ok_or_else(|| Error::missing_field("delay"))?;
        if delay_days >= MISSING_TIMESTAMP_AGE_DAYS {
            return Err(Error::invalid_value(
                "delay",
                format!("must be below {MISSING_TIMESTAMP_AGE_DAYS} days"),
            ));
        }

        if self.query.limit == 0 {
            return Err(Error::invalid_value("limit", "must be greater than zero"));
        }
        if self.query.fields.trim().is_empty() {
            return Err(Error::invalid_value("fields", "must not be empty"));
        }
        if self.query.order.trim().is_empty() {
            return Err(Error::invalid_value("order", "must not be empty"));
        }
        if self.timestamp_field.trim().is_empty() {
            return Err(Error::invalid_value("timestamp_field", "must not be empty"));
        }

        Ok(IngestConfig {
            endpoint: self.endpoint,
            delay_days,
            query: self.query,
            timestamp_field: self.timestamp_field,
            snapshot_root: self.snapshot_root,
            checkpoint: self.checkpoint,
        })
    }
}

/// Endpoint names become both a URL segment and a directory name
fn validate_endpoint(endpoint: &str) -> Result<()> {
    if endpoint.trim().is_empty() {
        return Err(Error::missing_field("endpoint"));
    }
    if endpoint == "." || endpoint == ".." || endpoint.contains(['/', '\\']) {
        return Err(Error::invalid_value(
            "endpoint",
            format!("'{endpoint}' is not a plain resource name"),
        ));
    }
    Ok(())
}
