//! Query/filter engine.
//!
//! Composable, conjunctive filter criteria over the document collection,
//! with date-descending ordering and head truncation.

use chrono::{DateTime, Duration, Utc};
use radar_core::Document;
use serde::{Deserialize, Serialize};

/// Criteria for a document query. All fields are optional and compose with
/// logical AND.
///
/// The literal value `"all"` on `topic`, `source`, or `doc_type` is the
/// wire-level sentinel for "no filter" and is treated as such here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentFilter {
    /// Case-insensitive substring match against any topic label
    pub topic: Option<String>,

    /// Exact match against the source name
    pub source: Option<String>,

    /// Exact match against the document type
    pub doc_type: Option<String>,

    /// Case-insensitive substring match against title OR summary
    pub search: Option<String>,

    /// Keep only documents published within the last N days. When active,
    /// documents with a missing or unparseable `published` are excluded.
    pub days: Option<i64>,

    /// Cap the result count after filtering and sorting
    pub limit: Option<usize>,
}

impl DocumentFilter {
    /// Create a new empty filter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter by topic substring.
    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = Some(topic.into());
        self
    }

    /// Filter by exact source.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Filter by exact document type.
    pub fn with_doc_type(mut self, doc_type: impl Into<String>) -> Self {
        self.doc_type = Some(doc_type.into());
        self
    }

    /// Filter by free-text search over title and summary.
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Filter by publication window in days.
    pub fn with_days(mut self, days: i64) -> Self {
        self.days = Some(days);
        self
    }

    /// Set the result cap.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Apply the filter against "now".
    ///
    /// Returns the matching documents sorted descending by publication
    /// date (missing dates last) plus the total count. The total is the
    /// post-limit count — that asymmetry is observable API behavior.
    pub fn apply(&self, documents: &[Document]) -> (Vec<Document>, usize) {
        self.apply_at(documents, Utc::now())
    }

    /// Apply the filter against an explicit "now" (for deterministic tests).
    pub fn apply_at(&self, documents: &[Document], now: DateTime<Utc>) -> (Vec<Document>, usize) {
        let mut matched: Vec<Document> = documents
            .iter()
            .filter(|d| self.matches(d, now))
            .cloned()
            .collect();

        // ISO-8601 strings sort chronologically; missing dates become ""
        // and land at the end of the descending order. The sort is stable,
        // so store order is preserved among equal keys.
        matched.sort_by(|a, b| b.published_key().cmp(a.published_key()));

        if let Some(limit) = self.limit {
            matched.truncate(limit);
        }

        let total = matched.len();
        (matched, total)
    }

    fn matches(&self, document: &Document, now: DateTime<Utc>) -> bool {
        if let Some(topic) = active(&self.topic) {
            let needle = topic.to_lowercase();
            if !document
                .topics
                .iter()
                .any(|t| t.to_lowercase().contains(&needle))
            {
                return false;
            }
        }

        if let Some(source) = active(&self.source) {
            if document.source != source {
                return false;
            }
        }

        if let Some(doc_type) = active(&self.doc_type) {
            if document.doc_type != doc_type {
                return false;
            }
        }

        if let Some(search) = self.search.as_deref() {
            let needle = search.to_lowercase();
            let in_title = document.title.to_lowercase().contains(&needle);
            let in_summary = document.summary.to_lowercase().contains(&needle);
            if !in_title && !in_summary {
                return false;
            }
        }

        if let Some(days) = self.days {
            // A window wider than chrono can represent has no reachable
            // cutoff; it keeps every dated document.
            let cutoff = Duration::try_days(days).and_then(|d| now.checked_sub_signed(d));
            // An active window excludes documents whose date is missing or
            // unparseable; without the window they are served normally.
            match document.published_at() {
                Some(published) => {
                    if let Some(cutoff) = cutoff {
                        if published < cutoff {
                            return false;
                        }
                    }
                }
                None => return false,
            }
        }

        true
    }
}

/// Treat `None` and the "all" sentinel as "no filter".
fn active(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| *v != "all")
}
