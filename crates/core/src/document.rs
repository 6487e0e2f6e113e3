//! Canonical document model.
//!
//! A `Document` is one normalized policy-related item (news article, legal
//! act, parliamentary record) from any source. Documents are created only by
//! the ingestion normalizer; the serving path treats them as read-only.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// A loosely-typed auxiliary value attached to a document.
///
/// Covers scalars only (string, number, boolean, null); nested structures
/// are deliberately unrepresentable. The untagged representation keeps the
/// JSON wire format flat: `"celex_number": "32024R1000"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExtraValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Null,
}

impl From<&str> for ExtraValue {
    fn from(value: &str) -> Self {
        ExtraValue::String(value.to_string())
    }
}

impl From<String> for ExtraValue {
    fn from(value: String) -> Self {
        ExtraValue::String(value)
    }
}

/// Normalized canonical record for one policy-related item.
///
/// Serialized field names are the wire format: one JSON object per line in
/// the durable JSONL file, and the payload of every API response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Globally unique id, stable across ingestion runs for the same
    /// logical item. Prefixed with a source tag to avoid collisions.
    pub id: String,

    /// Origin adapter name (e.g., "EUR-Lex", "EURACTIV", "EP Open Data")
    pub source: String,

    /// Open classification string (e.g., "news", "regulation", "resolution")
    pub doc_type: String,

    /// Display title
    pub title: String,

    /// Short descriptive text; may be empty
    #[serde(default)]
    pub summary: String,

    /// Full content; empty when the source does not expose full text
    #[serde(default)]
    pub body_text: String,

    /// Canonical source URL
    #[serde(default)]
    pub url: String,

    /// ISO-8601 timestamp string; `None` means "unknown date"
    #[serde(default)]
    pub published: Option<String>,

    /// Topic labels in source order; duplicates allowed, case preserved
    #[serde(default)]
    pub topics: Vec<String>,

    /// ISO language code
    #[serde(default = "default_language")]
    pub language: String,

    /// Source-specific auxiliary fields, opaque to the engine
    #[serde(default)]
    pub extra: BTreeMap<String, ExtraValue>,
}

fn default_language() -> String {
    "en".to_string()
}

impl Document {
    /// Parsed publication timestamp, if the stored string is parseable.
    ///
    /// Malformed values degrade to `None`: the document is excluded from
    /// date-window filters but still served by everything else.
    pub fn published_at(&self) -> Option<DateTime<Utc>> {
        self.published.as_deref().and_then(parse_published)
    }

    /// Sort key for descending-by-date ordering. Documents without a
    /// publication date sort as the empty string and land at the end.
    pub fn published_key(&self) -> &str {
        self.published.as_deref().unwrap_or("")
    }
}

/// Parse a stored publication timestamp leniently.
///
/// Sources emit a mix of formats: RFC 3339 with offset or `Z` suffix, naive
/// `YYYY-MM-DDTHH:MM:SS` (with optional fractional seconds), and bare
/// `YYYY-MM-DD` dates from SPARQL results. Anything else is "unknown date".
pub fn parse_published(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, fmt) {
            return Some(naive.and_utc());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(published: Option<&str>) -> Document {
        Document {
            id: "test-1".to_string(),
            source: "EUR-Lex".to_string(),
            doc_type: "regulation".to_string(),
            title: "Test".to_string(),
            summary: String::new(),
            body_text: String::new(),
            url: "https://example.org/1".to_string(),
            published: published.map(|s| s.to_string()),
            topics: vec![],
            language: "en".to_string(),
            extra: BTreeMap::new(),
        }
    }

    #[test]
    fn test_parse_published_rfc3339() {
        assert!(parse_published("2024-06-01T12:00:00Z").is_some());
        assert!(parse_published("2024-06-01T12:00:00+02:00").is_some());
    }

    #[test]
    fn test_parse_published_naive_and_date() {
        assert!(parse_published("2025-08-18T00:00:00").is_some());
        assert!(parse_published("2025-08-18T00:00:00.123456").is_some());
        assert!(parse_published("2024-06-01").is_some());
    }

    #[test]
    fn test_parse_published_malformed() {
        assert!(parse_published("not a date").is_none());
        assert!(parse_published("2024/06/01").is_none());
        assert!(parse_published("").is_none());
    }

    #[test]
    fn test_published_key_missing_sorts_lowest() {
        let with_date = doc(Some("2024-06-01T00:00:00"));
        let without = doc(None);
        assert!(with_date.published_key() > without.published_key());
        assert_eq!(without.published_key(), "");
    }

    #[test]
    fn test_serde_defaults() {
        // Minimal JSON: optional fields fall back to documented defaults
        let json = r#"{"id":"a","source":"S","doc_type":"news","title":"T"}"#;
        let doc: Document = serde_json::from_str(json).unwrap();
        assert_eq!(doc.language, "en");
        assert!(doc.topics.is_empty());
        assert!(doc.extra.is_empty());
        assert_eq!(doc.summary, "");
        assert_eq!(doc.body_text, "");
        assert!(doc.published.is_none());
    }

    #[test]
    fn test_json_round_trip() {
        let mut original = doc(Some("2024-01-01"));
        original.topics = vec!["Energy".to_string(), "energy".to_string()];
        original
            .extra
            .insert("celex_number".to_string(), ExtraValue::from("32024R1000"));
        original
            .extra
            .insert("page_count".to_string(), ExtraValue::Integer(12));

        let line = serde_json::to_string(&original).unwrap();
        // Untagged extras stay flat on the wire
        assert!(line.contains(r#""celex_number":"32024R1000""#));
        assert!(line.contains(r#""page_count":12"#));

        let restored: Document = serde_json::from_str(&line).unwrap();
        assert_eq!(original, restored);
    }
}
