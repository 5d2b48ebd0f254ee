//! CLI module
//!
//! Command-line interface for the ingestion tool.
//!
//! # Usage
//!
//! - `igdb-ingest --endpoint <name> --mode <collect|all> --delay <days>` -
//!   crawl one endpoint into page snapshots (the default action)
//! - `igdb-ingest flatten` - turn snapshot directories into CSV or Parquet tables

mod commands;
mod runner;

pub use commands::{Cli, CollectArgs, CollectMode, Commands};
pub use runner::Runner;
