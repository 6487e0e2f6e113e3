//! Stats and facet aggregation.
//!
//! Frequency counts grouped by source, type, and topic, plus the
//! time-windowed "this week" count. Source/type buckets keep discovery
//! order; topic facets are sorted by frequency.

use chrono::{DateTime, Duration, Utc};
use radar_core::Document;
use serde::{Deserialize, Serialize};

/// One facet bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacetCount {
    pub name: String,
    pub count: u64,
}

/// Dashboard statistics over the whole store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreStats {
    pub total_documents: u64,
    pub active_procedures: u64,
    pub this_week: u64,
    pub sources: Vec<FacetCount>,
    pub document_types: Vec<FacetCount>,
}

/// Aggregate store statistics against "now".
pub fn aggregate(documents: &[Document]) -> StoreStats {
    aggregate_at(documents, Utc::now())
}

/// Aggregate store statistics against an explicit "now".
pub fn aggregate_at(documents: &[Document], now: DateTime<Utc>) -> StoreStats {
    let week_ago = now - Duration::days(7);

    let mut sources: Vec<FacetCount> = Vec::new();
    let mut document_types: Vec<FacetCount> = Vec::new();
    let mut active_procedures = 0u64;
    let mut this_week = 0u64;

    for document in documents {
        bump(&mut sources, bucket_name(&document.source));
        bump(&mut document_types, bucket_name(&document.doc_type));

        if document.doc_type == "procedure" {
            active_procedures += 1;
        }

        // Unparseable timestamps are silently skipped, not errors
        if let Some(published) = document.published_at() {
            if published >= week_ago {
                this_week += 1;
            }
        }
    }

    StoreStats {
        total_documents: documents.len() as u64,
        active_procedures,
        this_week,
        sources,
        document_types,
    }
}

/// Distinct topics with frequencies, sorted descending by frequency
/// (name ascending on ties, for stable output).
pub fn topic_counts(documents: &[Document]) -> Vec<FacetCount> {
    let mut counts: Vec<FacetCount> = Vec::new();
    for document in documents {
        for topic in &document.topics {
            bump(&mut counts, topic.clone());
        }
    }

    counts.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
    counts
}

/// Distinct sources with frequencies, in discovery order.
pub fn source_counts(documents: &[Document]) -> Vec<FacetCount> {
    let mut counts: Vec<FacetCount> = Vec::new();
    for document in documents {
        bump(&mut counts, bucket_name(&document.source));
    }
    counts
}

/// Empty field values fall into the "Unknown" bucket.
fn bucket_name(value: &str) -> String {
    if value.is_empty() {
        "Unknown".to_string()
    } else {
        value.to_string()
    }
}

/// Increment a bucket, appending it on first sight. Linear scan is fine:
/// the number of distinct sources/types stays small.
fn bump(counts: &mut Vec<FacetCount>, name: String) {
    match counts.iter_mut().find(|c| c.name == name) {
        Some(bucket) => bucket.count += 1,
        None => counts.push(FacetCount { name, count: 1 }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn doc(id: &str, source: &str, doc_type: &str, published: Option<&str>, topics: &[&str]) -> Document {
        Document {
            id: id.to_string(),
            source: source.to_string(),
            doc_type: doc_type.to_string(),
            title: format!("Title {}", id),
            summary: String::new(),
            body_text: String::new(),
            url: String::new(),
            published: published.map(|s| s.to_string()),
            topics: topics.iter().map(|t| t.to_string()).collect(),
            language: "en".to_string(),
            extra: Default::default(),
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_by_type_counts() {
        let store = vec![
            doc("a", "S1", "news", None, &[]),
            doc("b", "S2", "news", None, &[]),
            doc("c", "S1", "regulation", None, &[]),
        ];

        let stats = aggregate_at(&store, now());
        assert_eq!(stats.total_documents, 3);
        assert_eq!(
            stats.document_types,
            vec![
                FacetCount { name: "news".to_string(), count: 2 },
                FacetCount { name: "regulation".to_string(), count: 1 },
            ]
        );
    }

    #[test]
    fn test_sources_keep_discovery_order() {
        let store = vec![
            doc("a", "Zeta", "news", None, &[]),
            doc("b", "Alpha", "news", None, &[]),
            doc("c", "Zeta", "news", None, &[]),
        ];

        let stats = aggregate_at(&store, now());
        assert_eq!(stats.sources[0].name, "Zeta");
        assert_eq!(stats.sources[0].count, 2);
        assert_eq!(stats.sources[1].name, "Alpha");
    }

    #[test]
    fn test_unknown_bucket_for_missing_values() {
        let store = vec![doc("a", "", "", None, &[])];
        let stats = aggregate_at(&store, now());
        assert_eq!(stats.sources[0].name, "Unknown");
        assert_eq!(stats.document_types[0].name, "Unknown");
    }

    #[test]
    fn test_this_week_skips_unparseable_dates() {
        let store = vec![
            doc("recent", "S", "news", Some("2024-06-14T00:00:00"), &[]),
            doc("old", "S", "news", Some("2024-01-01T00:00:00"), &[]),
            doc("bad", "S", "news", Some("garbage"), &[]),
            doc("none", "S", "news", None, &[]),
        ];

        let stats = aggregate_at(&store, now());
        assert_eq!(stats.this_week, 1);
    }

    #[test]
    fn test_active_procedures() {
        let store = vec![
            doc("a", "S", "procedure", None, &[]),
            doc("b", "S", "news", None, &[]),
            doc("c", "S", "procedure", None, &[]),
        ];

        let stats = aggregate_at(&store, now());
        assert_eq!(stats.active_procedures, 2);
    }

    #[test]
    fn test_topic_counts_sorted_by_frequency() {
        let store = vec![
            doc("a", "S", "news", None, &["energy", "transport"]),
            doc("b", "S", "news", None, &["energy"]),
            doc("c", "S", "news", None, &["climate"]),
        ];

        let topics = topic_counts(&store);
        assert_eq!(topics[0].name, "energy");
        assert_eq!(topics[0].count, 2);
        // Ties resolved by name for stable output
        assert_eq!(topics[1].name, "climate");
        assert_eq!(topics[2].name, "transport");
    }

    #[test]
    fn test_empty_store() {
        let stats = aggregate_at(&[], now());
        assert_eq!(stats.total_documents, 0);
        assert!(stats.sources.is_empty());
        assert!(topic_counts(&[]).is_empty());
    }
}
