//! Source adapter abstraction.
//!
//! Every external source implements `SourceAdapter`. Adapters are
//! independent (no shared mutable state), so the pipeline invokes them
//! concurrently.

use async_trait::async_trait;
use radar_core::AppResult;

use crate::types::RawRecord;

/// A source-specific fetch+parse component producing raw records.
#[async_trait]
pub trait SourceAdapter: Send + Sync {
    /// Source label stored on every document (e.g., "EUR-Lex").
    fn source_name(&self) -> &str;

    /// Prefix for document ids, disambiguating across sources.
    fn id_prefix(&self) -> &str;

    /// Fetch and parse the source's current batch.
    ///
    /// A whole-source failure (endpoint unreachable, malformed feed) is an
    /// `AppError::Source`; individual malformed entries are skipped inside
    /// the adapter and never surface here.
    async fn fetch(&self) -> AppResult<Vec<RawRecord>>;
}
