//! CLI commands and argument parsing
//!
//! Collecting is the default action (`igdb-ingest --endpoint games --mode
//! collect --delay 30`); flattening is the `flatten` subcommand.

use crate::config::{DEFAULT_BASE_URL, DEFAULT_SNAPSHOT_ROOT, DEFAULT_TOKEN_URL};
use crate::pagination::{DEFAULT_FIELDS, DEFAULT_LIMIT, DEFAULT_ORDER};
use crate::types::TableFormat;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// IGDB snapshot ingestion CLI
#[derive(Parser, Debug)]
#[command(name = "igdb-ingest")]
#[command(author, version, about, long_about = None)]
#[command(subcommand_negates_reqs = true)]
pub struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Collection arguments (used when no subcommand is given)
    #[command(flatten)]
    pub collect: CollectArgs,

    /// Subcommand to run instead of collecting
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Arguments of the default collect action
#[derive(Args, Debug, Clone)]
pub struct CollectArgs {
    /// API endpoint to crawl (e.g. games)
    #[arg(short, long, required = true)]
    pub endpoint: Option<String>,

    /// Collection mode (both modes run the same crawl)
    #[arg(short, long, value_enum, default_value_t = CollectMode::Collect)]
    pub mode: CollectMode,

    /// Stop once records are older than this many days
    #[arg(short, long, required = true)]
    pub delay: Option<u32>,

    /// Snapshot root directory
    #[arg(short, long, default_value = DEFAULT_SNAPSHOT_ROOT)]
    pub path: PathBuf,

    /// Records per page
    #[arg(long, default_value_t = DEFAULT_LIMIT)]
    pub limit: u32,

    /// Field selection
    #[arg(long, default_value = DEFAULT_FIELDS)]
    pub fields: String,

    /// Sort order
    #[arg(long, default_value = DEFAULT_ORDER)]
    pub order: String,

    /// Resume from the checkpoint file
    #[arg(long)]
    pub resume: bool,

    /// Checkpoint file used with --resume
    #[arg(long, default_value = ".igdb-checkpoint.json")]
    pub checkpoint: PathBuf,

    /// Per-request timeout in seconds (none by default)
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// API base URL
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// OAuth2 token URL
    #[arg(long, default_value = DEFAULT_TOKEN_URL)]
    pub token_url: String,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Flatten snapshots into one table per endpoint
    Flatten {
        /// Snapshot root directory
        #[arg(short, long, default_value = DEFAULT_SNAPSHOT_ROOT)]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, default_value = "./csv")]
        output: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = TableFormat::Csv)]
        format: TableFormat,

        /// Only flatten this endpoint
        #[arg(short, long)]
        endpoint: Option<String>,
    },
}

/// Collection mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum CollectMode {
    /// Incremental collection
    #[default]
    Collect,
    /// Full collection
    All,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_top_level_collect() {
        let cli = Cli::try_parse_from([
            "igdb-ingest",
            "--endpoint",
            "games",
            "--mode",
            "collect",
            "--delay",
            "30",
        ])
        .unwrap();

        assert!(cli.command.is_none());
        let args = cli.collect;
        assert_eq!(args.endpoint.as_deref(), Some("games"));
        assert_eq!(args.mode, CollectMode::Collect);
        assert_eq!(args.delay, Some(30));
        assert_eq!(args.path, PathBuf::from("./json"));
        assert_eq!(args.limit, 500);
        assert_eq!(args.fields, "*");
        assert_eq!(args.order, "updated_at:desc");
        assert!(!args.resume);
        assert_eq!(args.timeout_secs, None);
    }

    #[test]
    fn test_mode_all_and_defaults() {
        let cli = Cli::try_parse_from([
            "igdb-ingest", "-e", "platforms", "-m", "all", "-d", "7", "--resume",
        ])
        .unwrap();

        assert_eq!(cli.collect.mode, CollectMode::All);
        assert!(cli.collect.resume);

        let cli = Cli::try_parse_from(["igdb-ingest", "--endpoint", "games", "--delay", "1"])
            .unwrap();
        assert_eq!(cli.collect.mode, CollectMode::Collect);
    }

    #[test]
    fn test_collect_requires_endpoint_and_delay() {
        assert!(Cli::try_parse_from(["igdb-ingest", "--endpoint", "games"]).is_err());
        assert!(Cli::try_parse_from(["igdb-ingest", "--delay", "30"]).is_err());
        assert!(Cli::try_parse_from(["igdb-ingest"]).is_err());
    }

    #[test]
    fn test_flatten_defaults() {
        let cli = Cli::try_parse_from(["igdb-ingest", "-v", "flatten", "--format", "parquet"])
            .unwrap();
        assert!(cli.verbose);

        match cli.command {
            Some(Commands::Flatten {
                input,
                output,
                format,
                endpoint,
            }) => {
                assert_eq!(input, PathBuf::from("./json"));
                assert_eq!(output, PathBuf::from("./csv"));
                assert_eq!(format, TableFormat::Parquet);
                assert_eq!(endpoint, None);
            }
            other => panic!("Expected Flatten, got {other:?}"),
        }
    }
}
