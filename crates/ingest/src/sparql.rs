//! Structured-query adapter for the EUR-Lex SPARQL endpoint.
//!
//! Issues a bounded query (time-window predicate, top-N by date descending)
//! against the publications office's CDM graph and converts each result
//! binding into a raw record. Full body text is not available from SPARQL
//! and stays empty; nothing is fabricated.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use radar_core::{AppError, AppResult};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};

use crate::adapter::SourceAdapter;
use crate::types::RawRecord;

/// Adapter for an EUR-Lex-style SPARQL endpoint.
pub struct SparqlAdapter {
    endpoint: String,
    window_days: i64,
    result_limit: u32,
    client: reqwest::Client,
}

/// SPARQL JSON results envelope (application/sparql-results+json).
#[derive(Debug, Deserialize)]
struct SparqlResponse {
    results: SparqlResults,
}

#[derive(Debug, Deserialize)]
struct SparqlResults {
    bindings: Vec<HashMap<String, SparqlValue>>,
}

#[derive(Debug, Deserialize)]
struct SparqlValue {
    value: String,
}

impl SparqlAdapter {
    /// Create an adapter with a publication window and result cap.
    pub fn new(endpoint: impl Into<String>, window_days: i64, result_limit: u32) -> Self {
        Self {
            endpoint: endpoint.into(),
            window_days,
            result_limit,
            client: reqwest::Client::new(),
        }
    }

    /// Build the CDM query for recent regulations and directives.
    fn build_query(&self, cutoff_date: &str) -> String {
        format!(
            r#"PREFIX cdm: <http://publications.europa.eu/ontology/cdm#>
PREFIX xsd: <http://www.w3.org/2001/XMLSchema#>

SELECT DISTINCT ?work ?title ?date ?url
WHERE {{
    ?work a cdm:work .

    ?work cdm:work_title ?title_node .
    FILTER(lang(?title_node) = 'en')
    BIND(STR(?title_node) AS ?title)

    ?work cdm:work_date_document ?date .
    FILTER(?date > "{cutoff}"^^xsd:date)

    ?work cdm:work_is_realized_by_expression ?expression .
    ?expression cdm:expression_language <http://publications.europa.eu/resource/authority/language/ENG> .
    ?expression cdm:expression_manifested_by_manifestation ?manifestation .
    ?manifestation cdm:manifestation_type "html" .
    ?manifestation cdm:manifestation_url ?url .
}}
ORDER BY DESC(?date)
LIMIT {limit}"#,
            cutoff = cutoff_date,
            limit = self.result_limit
        )
    }
}

#[async_trait]
impl SourceAdapter for SparqlAdapter {
    fn source_name(&self) -> &str {
        "EUR-Lex"
    }

    fn id_prefix(&self) -> &str {
        "eurlex"
    }

    async fn fetch(&self) -> AppResult<Vec<RawRecord>> {
        let cutoff = (Utc::now() - Duration::days(self.window_days))
            .format("%Y-%m-%d")
            .to_string();
        let query = self.build_query(&cutoff);

        tracing::info!(
            "Querying SPARQL endpoint {} (window {} days, limit {})",
            self.endpoint,
            self.window_days,
            self.result_limit
        );

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("query", query.as_str()),
                ("format", "application/sparql-results+json"),
            ])
            .send()
            .await
            .map_err(|e| AppError::Source(format!("SPARQL request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::Source(format!(
                "SPARQL endpoint {} returned HTTP {}",
                self.endpoint,
                response.status()
            )));
        }

        let parsed: SparqlResponse = response
            .json()
            .await
            .map_err(|e| AppError::Source(format!("Failed to parse SPARQL response: {}", e)))?;

        let records = convert_bindings(parsed);
        tracing::info!("Fetched {} works from {}", records.len(), self.endpoint);
        Ok(records)
    }
}

/// Convert result bindings into raw records.
///
/// Bindings without a `?work` URI are skipped; everything else degrades to
/// documented defaults.
fn convert_bindings(response: SparqlResponse) -> Vec<RawRecord> {
    let mut records = Vec::new();

    for binding in response.results.bindings {
        let Some(work_uri) = binding.get("work").map(|v| v.value.as_str()) else {
            continue;
        };

        // The trailing URI segment is the stable native identifier
        let native_id = work_uri.rsplit('/').next().unwrap_or(work_uri).to_string();
        if native_id.is_empty() {
            continue;
        }

        let date = binding.get("date").map(|v| v.value.clone());
        let summary = format!(
            "EU legal document published on {}.",
            date.as_deref().unwrap_or("N/A")
        );

        records.push(RawRecord {
            native_id: Some(native_id),
            title: binding
                .get("title")
                .map(|v| v.value.clone())
                .unwrap_or_default(),
            summary,
            // Full text requires scraping the manifestation URL
            body_text: String::new(),
            url: binding.get("url").map(|v| v.value.clone()).unwrap_or_default(),
            published: date,
            topics: vec![
                "EU Legislation".to_string(),
                "Regulation".to_string(),
                "Directive".to_string(),
            ],
            doc_type: "Legal".to_string(),
            language: Some("en".to_string()),
            extra: BTreeMap::new(),
        });
    }

    records
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response_from(json: &str) -> SparqlResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_convert_bindings() {
        let response = response_from(
            r#"{
              "results": {
                "bindings": [
                  {
                    "work": {"type": "uri", "value": "http://publications.europa.eu/resource/cellar/abc123"},
                    "title": {"type": "literal", "value": "Regulation on hydrogen networks"},
                    "date": {"type": "literal", "value": "2025-07-01"},
                    "url": {"type": "literal", "value": "https://eur-lex.europa.eu/doc/abc123"}
                  }
                ]
              }
            }"#,
        );

        let records = convert_bindings(response);
        assert_eq!(records.len(), 1);

        let record = &records[0];
        assert_eq!(record.native_id.as_deref(), Some("abc123"));
        assert_eq!(record.title, "Regulation on hydrogen networks");
        assert_eq!(record.published.as_deref(), Some("2025-07-01"));
        assert_eq!(record.summary, "EU legal document published on 2025-07-01.");
        assert_eq!(record.body_text, "");
        assert_eq!(record.doc_type, "Legal");
    }

    #[test]
    fn test_binding_without_work_uri_is_skipped() {
        let response = response_from(
            r#"{"results": {"bindings": [
                {"title": {"type": "literal", "value": "Orphan row"}},
                {"work": {"type": "uri", "value": "http://publications.europa.eu/resource/cellar/x1"}}
            ]}}"#,
        );

        let records = convert_bindings(response);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].native_id.as_deref(), Some("x1"));
    }

    #[test]
    fn test_missing_date_defaults_summary() {
        let response = response_from(
            r#"{"results": {"bindings": [
                {"work": {"type": "uri", "value": "http://publications.europa.eu/resource/cellar/x2"}}
            ]}}"#,
        );

        let records = convert_bindings(response);
        assert_eq!(records[0].summary, "EU legal document published on N/A.");
        assert!(records[0].published.is_none());
    }

    #[test]
    fn test_build_query_embeds_cutoff_and_limit() {
        let adapter = SparqlAdapter::new("http://example.org/sparql", 365, 50);
        let query = adapter.build_query("2024-08-29");
        assert!(query.contains(r#""2024-08-29"^^xsd:date"#));
        assert!(query.contains("LIMIT 50"));
        assert!(query.contains("ORDER BY DESC(?date)"));
    }
}
