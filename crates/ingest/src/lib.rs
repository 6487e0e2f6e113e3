//! Document ingestion for Policy Radar.
//!
//! Source adapters fetch raw records from external endpoints (RSS feeds,
//! SPARQL knowledge bases) or generate synthetic batches; the normalizer
//! maps them into canonical `Document`s; the pipeline fans adapters out
//! concurrently and persists the results.
//!
//! Adapters are resilient by contract: one bad entry or one failed request
//! never loses the rest of the batch.

pub mod adapter;
pub mod feed;
pub mod normalize;
pub mod pipeline;
pub mod sparql;
pub mod synthetic;
pub mod types;

// Re-export commonly used types
pub use adapter::SourceAdapter;
pub use feed::FeedAdapter;
pub use pipeline::{fetch_all, run_ingestion, IngestOptions};
pub use sparql::SparqlAdapter;
pub use synthetic::{SyntheticAdapter, SyntheticKind};
pub use types::{IngestReport, RawRecord, SourceCount};
