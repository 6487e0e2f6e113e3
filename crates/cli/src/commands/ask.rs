//! Ask command handler.
//!
//! Answers a free-text question from the local document collection.

use clap::Args;
use radar_core::{config::AppConfig, AppResult};
use radar_engine::{respond, DocumentStore};

/// Ask a free-text question against the collection
#[derive(Args, Debug)]
pub struct AskCommand {
    /// Question text
    pub query: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl AskCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing ask command");

        let store = DocumentStore::load(config);
        let documents = store.snapshot();
        let answer = respond(&documents, &self.query);

        if self.json {
            println!("{}", serde_json::to_string_pretty(&answer)?);
        } else {
            println!("{}", answer.response);
            if !answer.sources.is_empty() {
                println!("\nSources:");
                for source in &answer.sources {
                    println!("  {} ({})", source.title, source.id);
                }
            }
        }

        Ok(())
    }
}
