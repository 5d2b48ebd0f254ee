// Allow common clippy pedantic lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::must_use_candidate)]

//! igdb-ingest CLI
//!
//! Collect IGDB endpoint snapshots and flatten them into tables

use clap::Parser;
use igdb_ingest::cli::{Cli, Runner};
use tracing_subscriber::EnvFilter;

/// Load a `.env` file if present; only a malformed file is worth mentioning
fn load_dotenv() {
    if let Err(err) = dotenvy::dotenv() {
        if !err.not_found() {
            eprintln!("Warning: failed to load .env file: {err}");
        }
    }
}

#[tokio::main]
async fn main() {
    load_dotenv();

    let cli = Cli::parse();

    // Initialize logging
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    let runner = Runner::new(cli);

    if let Err(e) = runner.run().await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
