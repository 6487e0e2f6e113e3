//! Syndication feed adapter.
//!
//! Fetches an RSS/Atom feed over HTTP and converts its entries into raw
//! records. A structurally broken feed is a whole-source failure; a broken
//! individual entry is skipped and the rest of the batch survives.

use std::collections::BTreeMap;

use async_trait::async_trait;
use radar_core::{AppError, AppResult};

use crate::adapter::SourceAdapter;
use crate::types::RawRecord;

/// Some feed hosts reject default HTTP client user agents with 403, so we
/// present a common browser identity.
const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) \
     Chrome/58.0.3029.110 Safari/537.3";

/// Adapter for a news syndication feed (EURACTIV-style).
pub struct FeedAdapter {
    source_name: String,
    id_prefix: String,
    url: String,
    client: reqwest::Client,
}

impl FeedAdapter {
    /// Create an adapter for the given feed URL.
    pub fn new(source_name: impl Into<String>, id_prefix: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            source_name: source_name.into(),
            id_prefix: id_prefix.into(),
            url: url.into(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl SourceAdapter for FeedAdapter {
    fn source_name(&self) -> &str {
        &self.source_name
    }

    fn id_prefix(&self) -> &str {
        &self.id_prefix
    }

    async fn fetch(&self) -> AppResult<Vec<RawRecord>> {
        tracing::info!("Fetching feed: {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .header(reqwest::header::USER_AGENT, BROWSER_USER_AGENT)
            .send()
            .await
            .map_err(|e| AppError::Source(format!("Failed to fetch feed {}: {}", self.url, e)))?;

        if !response.status().is_success() {
            return Err(AppError::Source(format!(
                "Feed {} returned HTTP {}",
                self.url,
                response.status()
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| AppError::Source(format!("Failed to read feed body: {}", e)))?;

        let records = parse_feed(&bytes)?;
        tracing::info!("Fetched {} entries from {}", records.len(), self.url);
        Ok(records)
    }
}

/// Parse feed bytes into raw records.
///
/// A feed that fails structural validation is a source-level error (the
/// bozo case). Entries missing a link or title are logged and skipped.
pub fn parse_feed(bytes: &[u8]) -> AppResult<Vec<RawRecord>> {
    let feed = feed_rs::parser::parse(bytes)
        .map_err(|e| AppError::Source(format!("Malformed feed: {}", e)))?;

    let feed_language = feed.language.clone();
    let mut records = Vec::new();

    for entry in feed.entries {
        match convert_entry(entry, feed_language.as_deref()) {
            Some(record) => records.push(record),
            None => tracing::warn!("Skipping feed entry without link or title"),
        }
    }

    Ok(records)
}

/// Convert one feed entry, or `None` when it lacks the required fields.
fn convert_entry(entry: feed_rs::model::Entry, feed_language: Option<&str>) -> Option<RawRecord> {
    let link = entry.links.first().map(|l| l.href.clone())?;
    let title = entry.title.as_ref().map(|t| t.content.clone())?;

    // Full text is not in the feed; the summary doubles as body text.
    let summary = entry
        .summary
        .as_ref()
        .map(|t| t.content.clone())
        .unwrap_or_default();

    let published = entry
        .published
        .map(|dt| dt.format("%Y-%m-%dT%H:%M:%SZ").to_string());

    let topics = entry.categories.iter().map(|c| c.term.clone()).collect();

    let native_id = if entry.id.trim().is_empty() {
        None
    } else {
        Some(entry.id)
    };

    Some(RawRecord {
        native_id,
        title,
        body_text: summary.clone(),
        summary,
        url: link,
        published,
        topics,
        doc_type: "news".to_string(),
        language: feed_language.map(|l| l.to_string()),
        extra: BTreeMap::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RSS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Policy News</title>
    <link>https://news.example.org</link>
    <description>Policy updates</description>
    <language>en</language>
    <item>
      <guid>https://news.example.org/articles/1</guid>
      <title>Hydrogen corridors approved</title>
      <link>https://news.example.org/articles/1</link>
      <description>The Commission approved new hydrogen corridors.</description>
      <category>Energy</category>
      <category>Hydrogen</category>
      <pubDate>Mon, 18 Aug 2025 09:30:00 GMT</pubDate>
    </item>
    <item>
      <guid>https://news.example.org/articles/2</guid>
      <title>Transport council meets</title>
      <link>https://news.example.org/articles/2</link>
      <description>Ministers discussed fleet electrification.</description>
    </item>
  </channel>
</rss>"#;

    #[test]
    fn test_parse_feed_entries() {
        let records = parse_feed(SAMPLE_RSS.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);

        let first = &records[0];
        assert_eq!(first.title, "Hydrogen corridors approved");
        assert_eq!(first.url, "https://news.example.org/articles/1");
        assert_eq!(first.topics, vec!["Energy", "Hydrogen"]);
        assert_eq!(first.doc_type, "news");
        assert_eq!(first.published.as_deref(), Some("2025-08-18T09:30:00Z"));
        // Summary doubles as body text
        assert_eq!(first.summary, first.body_text);
    }

    #[test]
    fn test_parse_feed_missing_published_is_none() {
        let records = parse_feed(SAMPLE_RSS.as_bytes()).unwrap();
        assert!(records[1].published.is_none());
    }

    #[test]
    fn test_parse_feed_malformed_is_source_error() {
        let result = parse_feed(b"this is not xml at all");
        assert!(matches!(result, Err(AppError::Source(_))));
    }
}
