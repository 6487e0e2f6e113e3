//! Policy Radar CLI
//!
//! Main entry point for the radar command-line tool.
//! Provides commands for ingesting, querying and serving the policy
//! document collection.

mod commands;

use clap::{Parser, Subcommand};
use commands::{AskCommand, IngestCommand, QueryCommand, ServeCommand, StatsCommand};
use radar_core::{config::AppConfig, logging, AppResult};
use std::path::PathBuf;

/// Policy Radar CLI - EU policy document aggregation
#[derive(Parser, Debug)]
#[command(name = "radar")]
#[command(about = "EU policy document aggregation and search", long_about = None)]
#[command(version)]
struct Cli {
    /// Directory for the JSONL document store
    #[arg(short, long, global = true, env = "RADAR_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Path to config file
    #[arg(short, long, global = true, env = "RADAR_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, env = "RUST_LOG")]
    log_level: Option<String>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(ServeCommand),

    /// Fetch documents from the configured sources
    Ingest(IngestCommand),

    /// Query the document collection
    Query(QueryCommand),

    /// Show collection statistics
    Stats(StatsCommand),

    /// Ask a free-text question against the collection
    Ask(AskCommand),
}

#[tokio::main]
async fn main() -> AppResult<()> {
    // Parse command-line arguments first (needed for logging config)
    let cli = Cli::parse();

    // Load base configuration from environment
    let config = AppConfig::load()?;

    // Apply CLI overrides
    let config = config.with_overrides(
        cli.data_dir,
        cli.config,
        None,
        None,
        cli.log_level,
        cli.verbose,
        cli.no_color,
    );

    // Initialize logging with final configuration
    logging::init_logging(config.log_level.as_deref(), config.no_color)?;

    tracing::info!("Policy Radar CLI starting");
    tracing::debug!("Data dir: {:?}", config.data_dir);

    let command_name = match &cli.command {
        Commands::Serve(_) => "serve",
        Commands::Ingest(_) => "ingest",
        Commands::Query(_) => "query",
        Commands::Stats(_) => "stats",
        Commands::Ask(_) => "ask",
    };
    let _span = tracing::info_span!("command", name = command_name).entered();

    let result = match cli.command {
        Commands::Serve(cmd) => cmd.execute(config).await,
        Commands::Ingest(cmd) => cmd.execute(&config).await,
        Commands::Query(cmd) => cmd.execute(&config).await,
        Commands::Stats(cmd) => cmd.execute(&config).await,
        Commands::Ask(cmd) => cmd.execute(&config).await,
    };

    match &result {
        Ok(_) => tracing::info!("Command completed successfully"),
        Err(e) => tracing::error!("Command failed: {}", e),
    }

    result
}
