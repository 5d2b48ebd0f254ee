// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # igdb-ingest
//!
//! Incremental snapshot ingestion for the IGDB API.
//!
//! ## Features
//!
//! - **Client-credentials auth**: exchange `CLIENT_ID`/`CLIENT_SECRET` for a bearer token
//! - **Newest-first crawl**: offset pagination that stops at a short page or
//!   once records fall behind a recency horizon
//! - **Durable snapshots**: every page lands on disk before the next request
//! - **Resumable runs**: optional per-endpoint checkpoint file
//! - **Flattening**: snapshot directories become CSV or Parquet tables
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use igdb_ingest::auth::{ApiAuth, Credentials, TokenProvider};
//! use igdb_ingest::config::{ApiConfig, IngestConfig};
//! use igdb_ingest::fetch::HttpPageFetcher;
//! use igdb_ingest::http::{HttpClient, HttpClientConfig};
//! use igdb_ingest::snapshot::FsSnapshotWriter;
//! use igdb_ingest::{engine, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let api = ApiConfig::default();
//!     let credentials = Credentials::from_env()?;
//!     let token = TokenProvider::new(&api.token_url).fetch_token(&credentials).await?;
//!
//!     let auth = ApiAuth::new(credentials.client_id.clone(), token);
//!     let client = HttpClient::with_auth(HttpClientConfig::from(&api), auth)?;
//!     let fetcher = HttpPageFetcher::new(client);
//!     let sink = FsSnapshotWriter::new("./json");
//!
//!     let config = IngestConfig::builder("games").delay_days(30).build()?;
//!     let report = engine::run(&fetcher, &sink, &config, None).await?;
//!     println!("{} pages, stopped on {}", report.iterations(), report.stop_reason);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   token   ┌──────────────┐  page   ┌───────────────┐
//! │ TokenProvider│──────────▶│ PageFetcher  │────────▶│ SnapshotSink  │
//! └──────────────┘           └──────┬───────┘         └───────┬───────┘
//!                                   │ engine::run             │ <root>/<endpoint>/*.json
//!                                   ▼                         ▼
//!                            ┌──────────────┐         ┌───────────────┐
//!                            │ stop check   │         │ flatten_all   │
//!                            │ short page / │         │ CSV / Parquet │
//!                            │ horizon      │         └───────────────┘
//!                            └──────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// API and ingestion configuration
pub mod config;

/// Client-credentials authentication
pub mod auth;

/// HTTP client
pub mod http;

/// Query state and stop conditions
pub mod pagination;

/// Page fetching
pub mod fetch;

/// Page snapshot persistence
pub mod snapshot;

/// Checkpointing
pub mod state;

/// The ingestion loop
pub mod engine;

/// Snapshot flattening and table output
pub mod output;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
