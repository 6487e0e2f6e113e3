//! In-memory serving engine for Policy Radar.
//!
//! Hosts the read-mostly document store and everything served from it:
//! filtered queries, facet aggregation, and the keyword-overlap response
//! generator. All serving-path operations are read-only over an atomic
//! store snapshot; the only writer is the ingestion pipeline.

pub mod query;
pub mod respond;
pub mod sample;
pub mod stats;
pub mod store;

// Re-export commonly used types
pub use query::DocumentFilter;
pub use respond::{respond, RagAnswer, SourceRef};
pub use stats::{aggregate, source_counts, topic_counts, FacetCount, StoreStats};
pub use store::DocumentStore;
