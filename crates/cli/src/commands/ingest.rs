//! Ingest command handler.
//!
//! Runs a full ingestion over the live source adapters and persists the
//! result.

use clap::Args;
use radar_core::{config::AppConfig, AppResult, PersistMode};
use radar_ingest::{run_ingestion, FeedAdapter, IngestOptions, SourceAdapter, SparqlAdapter};

/// Fetch documents from the configured sources
#[derive(Args, Debug)]
pub struct IngestCommand {
    /// Merge into the existing collection instead of the configured default
    #[arg(long, conflicts_with = "replace")]
    pub merge: bool,

    /// Replace the existing collection instead of the configured default
    #[arg(long, conflicts_with = "merge")]
    pub replace: bool,

    /// Lookback window in days for the legal-database query
    #[arg(long)]
    pub window_days: Option<i64>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl IngestCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing ingest command");

        let window_days = self.window_days.unwrap_or(config.window_days);

        let adapters: Vec<Box<dyn SourceAdapter>> = vec![
            Box::new(FeedAdapter::new("EURACTIV", "euractiv", &config.feed_url)),
            Box::new(SparqlAdapter::new(
                &config.sparql_endpoint,
                window_days,
                config.result_limit,
            )),
        ];

        let mut options = IngestOptions::from_config(config);
        if self.merge {
            options.mode = PersistMode::Merge;
        } else if self.replace {
            options.mode = PersistMode::Replace;
        }

        let report = run_ingestion(config, &adapters, options).await?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            for source in &report.ingested_by_source {
                println!("{}: {} documents", source.name, source.count);
            }
            for error in &report.errors {
                println!("error: {}", error);
            }
            println!(
                "Ingested {} new documents (store size {})",
                report.total_new_documents, report.store_size
            );
        }

        Ok(())
    }
}
