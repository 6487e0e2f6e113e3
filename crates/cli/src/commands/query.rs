//! Query command handler.
//!
//! Filters the local document collection and prints the matches.

use clap::Args;
use radar_core::{config::AppConfig, AppResult};
use radar_engine::{DocumentFilter, DocumentStore};

/// Query the document collection
#[derive(Args, Debug)]
pub struct QueryCommand {
    /// Filter by topic (case-insensitive substring)
    #[arg(short, long)]
    pub topic: Option<String>,

    /// Filter by source name (exact match)
    #[arg(short, long)]
    pub source: Option<String>,

    /// Filter by document type (exact match)
    #[arg(long)]
    pub doc_type: Option<String>,

    /// Full-text search over title and summary
    #[arg(long)]
    pub search: Option<String>,

    /// Only documents published in the last N days
    #[arg(long)]
    pub days: Option<i64>,

    /// Maximum number of results
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl QueryCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing query command");

        let mut filter = DocumentFilter::new();
        if let Some(topic) = &self.topic {
            filter = filter.with_topic(topic);
        }
        if let Some(source) = &self.source {
            filter = filter.with_source(source);
        }
        if let Some(doc_type) = &self.doc_type {
            filter = filter.with_doc_type(doc_type);
        }
        if let Some(search) = &self.search {
            filter = filter.with_search(search);
        }
        if let Some(days) = self.days {
            filter = filter.with_days(days);
        }
        if let Some(limit) = self.limit {
            filter = filter.with_limit(limit);
        }

        let store = DocumentStore::load(config);
        let documents = store.snapshot();
        let (matched, total) = filter.apply(&documents);

        if self.json {
            let output = serde_json::json!({
                "documents": matched,
                "total": total,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            for document in &matched {
                println!(
                    "{}  {}  [{}] {}",
                    document.published.as_deref().unwrap_or("unknown date"),
                    document.doc_type,
                    document.source,
                    document.title
                );
            }
            println!("{} documents", total);
        }

        Ok(())
    }
}
