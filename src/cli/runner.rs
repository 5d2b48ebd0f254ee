//! CLI runner - executes commands

use crate::auth::{ApiAuth, Credentials, TokenProvider};
use crate::cli::commands::{Cli, CollectArgs, CollectMode, Commands};
use crate::config::{ApiConfig, IngestConfig};
use crate::engine::{self, IngestReport};
use crate::error::{Error, Result, ResultExt};
use crate::fetch::HttpPageFetcher;
use crate::http::{HttpClient, HttpClientConfig};
use crate::output::{flatten_all, flatten_endpoint, FlattenReport};
use crate::snapshot::FsSnapshotWriter;
use crate::state::CheckpointStore;
use crate::types::TableFormat;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, warn};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            None => self.collect(&self.cli.collect).await.map(|_| ()),
            Some(Commands::Flatten {
                input,
                output,
                format,
                endpoint,
            }) => self
                .flatten(input, output, *format, endpoint.as_deref())
                .map(|_| ()),
        }
    }

    /// Authenticate, then crawl one endpoint into snapshots
    async fn collect(&self, args: &CollectArgs) -> Result<IngestReport> {
        if args.mode == CollectMode::All {
            debug!("Mode 'all' runs the same crawl as 'collect'");
        }

        let endpoint = args
            .endpoint
            .as_deref()
            .ok_or_else(|| Error::missing_field("endpoint"))?;
        let delay = args.delay.ok_or_else(|| Error::missing_field("delay"))?;

        let mut ingest = IngestConfig::builder(endpoint)
            .delay_days(delay)
            .limit(args.limit)
            .fields(args.fields.as_str())
            .order(args.order.as_str())
            .snapshot_root(args.path.as_path());
        if args.resume {
            ingest = ingest.checkpoint(args.checkpoint.as_path());
        }
        let ingest = ingest.build()?;

        let api = ApiConfig::builder()
            .base_url(args.base_url.as_str())
            .token_url(args.token_url.as_str())
            .timeout(args.timeout_secs.map(Duration::from_secs))
            .build()?;

        let credentials = Credentials::from_env()?;
        let token = TokenProvider::new(&api.token_url)
            .fetch_token(&credentials)
            .await?;
        info!(
            expires_in = ?token.remaining_seconds(),
            "Obtained access token"
        );

        let auth = ApiAuth::new(credentials.client_id.clone(), token);
        let client = HttpClient::with_auth(HttpClientConfig::from(&api), auth)?;
        let fetcher = HttpPageFetcher::new(client);
        let sink = FsSnapshotWriter::new(&ingest.snapshot_root);

        let store = match &ingest.checkpoint {
            Some(path) => Some(
                CheckpointStore::from_file(path)
                    .with_context(|| format!("Cannot resume from {}", path.display()))?,
            ),
            None => None,
        };

        let report = engine::run(&fetcher, &sink, &ingest, store.as_ref()).await?;

        info!(
            endpoint = %report.endpoint,
            pages = report.iterations(),
            records = report.stats.records_persisted,
            final_offset = report.final_offset,
            reason = %report.stop_reason,
            duration_ms = report.stats.duration_ms,
            directory = %ingest.endpoint_dir().display(),
            "Collection complete"
        );

        Ok(report)
    }

    /// Flatten one endpoint or every endpoint under `input`
    fn flatten(
        &self,
        input: &Path,
        output: &Path,
        format: TableFormat,
        endpoint: Option<&str>,
    ) -> Result<Vec<FlattenReport>> {
        let reports = match endpoint {
            Some(name) => {
                flatten_endpoint(&input.join(name), output, format)?.into_iter().collect()
            }
            None => flatten_all(input, output, format)?,
        };

        if reports.is_empty() {
            warn!(input = %input.display(), "Nothing to flatten");
        }

        Ok(reports)
    }
}
