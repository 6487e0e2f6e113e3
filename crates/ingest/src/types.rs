//! Ingestion type definitions.

use std::collections::BTreeMap;

use radar_core::ExtraValue;
use serde::{Deserialize, Serialize};

/// A source-native record before normalization.
///
/// Adapters fill in what their source exposes and leave the rest empty;
/// fields absent from a source's payload are never fabricated.
#[derive(Debug, Clone, Default)]
pub struct RawRecord {
    /// Source-native identifier, when the source provides one
    pub native_id: Option<String>,

    /// Display title
    pub title: String,

    /// Short descriptive text
    pub summary: String,

    /// Full content; empty when the source does not expose it
    pub body_text: String,

    /// Canonical source URL
    pub url: String,

    /// ISO-8601 publication timestamp, already converted to UTC
    pub published: Option<String>,

    /// Topic labels in source order
    pub topics: Vec<String>,

    /// Classification assigned by the adapter (e.g., "news", "Legal")
    pub doc_type: String,

    /// ISO language code, when the source declares one
    pub language: Option<String>,

    /// Source-specific auxiliary fields
    pub extra: BTreeMap<String, ExtraValue>,
}

/// Per-source document count from an ingestion run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceCount {
    pub name: String,
    pub count: usize,
}

/// Outcome report for one ingestion run.
///
/// A failed adapter contributes an error string and zero documents; it never
/// aborts the run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IngestReport {
    /// Documents fetched per source, in adapter order
    pub ingested_by_source: Vec<SourceCount>,

    /// Per-source error messages (source unavailable, malformed feed, timeout)
    pub errors: Vec<String>,

    /// Documents fetched across all sources, before deduplication
    pub total_fetched: usize,

    /// Documents actually added to the store (equals `total_fetched` in
    /// replace mode; may be lower in merge mode)
    pub total_new_documents: usize,

    /// Store size after persistence
    pub store_size: usize,
}
