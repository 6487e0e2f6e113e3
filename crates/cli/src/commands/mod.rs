//! Command handlers for the Policy Radar CLI.
//!
//! This module organizes all CLI commands into separate submodules.

pub mod ask;
pub mod ingest;
pub mod query;
pub mod serve;
pub mod stats;

// Re-export command types for convenience
pub use ask::AskCommand;
pub use ingest::IngestCommand;
pub use query::QueryCommand;
pub use serve::ServeCommand;
pub use stats::StatsCommand;
