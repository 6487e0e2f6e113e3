//! Stats command handler.
//!
//! Prints aggregate counts for the local document collection.

use clap::Args;
use radar_core::{config::AppConfig, AppResult};
use radar_engine::{aggregate, topic_counts, DocumentStore};

/// Show collection statistics
#[derive(Args, Debug)]
pub struct StatsCommand {
    /// Also list topic counts
    #[arg(long)]
    pub topics: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl StatsCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing stats command");

        let store = DocumentStore::load(config);
        let documents = store.snapshot();
        let stats = aggregate(&documents);

        if self.json {
            let mut output = serde_json::to_value(&stats)?;
            if self.topics {
                output["topics"] = serde_json::to_value(topic_counts(&documents))?;
            }
            println!("{}", serde_json::to_string_pretty(&output)?);
            return Ok(());
        }

        println!("Documents:          {}", stats.total_documents);
        println!("Active procedures:  {}", stats.active_procedures);
        println!("Published this week: {}", stats.this_week);

        println!("\nSources:");
        for source in &stats.sources {
            println!("  {}: {}", source.name, source.count);
        }

        println!("\nDocument types:");
        for doc_type in &stats.document_types {
            println!("  {}: {}", doc_type.name, doc_type.count);
        }

        if self.topics {
            println!("\nTopics:");
            for topic in topic_counts(&documents) {
                println!("  {}: {}", topic.name, topic.count);
            }
        }

        Ok(())
    }
}
