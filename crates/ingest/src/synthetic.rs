//! Synthetic sample adapters.
//!
//! The runtime ingest endpoint is scoped to deterministic generators rather
//! than live endpoints: given a topic they emit realistic-looking batches
//! with stable ids, so repeated runs against the same topic are de-duplicated
//! down to zero new documents.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{Datelike, Duration, Utc};
use radar_core::{AppResult, ExtraValue};

use crate::adapter::SourceAdapter;
use crate::types::RawRecord;

/// Which synthetic source to emulate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntheticKind {
    /// Legal database: regulations and directives
    EurLex,
    /// News feed: policy articles
    Euractiv,
    /// Parliamentary records: questions and resolutions
    Parliament,
}

impl SyntheticKind {
    /// Resolve a requested source name ("eur-lex", "euractiv", "ep").
    pub fn from_request_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "eur-lex" => Some(SyntheticKind::EurLex),
            "euractiv" => Some(SyntheticKind::Euractiv),
            "ep" => Some(SyntheticKind::Parliament),
            _ => None,
        }
    }

    /// All synthetic sources, in the order the ingest endpoint defaults to.
    pub fn all() -> [SyntheticKind; 3] {
        [
            SyntheticKind::EurLex,
            SyntheticKind::Euractiv,
            SyntheticKind::Parliament,
        ]
    }
}

/// Deterministic generator for one synthetic source.
pub struct SyntheticAdapter {
    kind: SyntheticKind,
    topic: String,
    limit: usize,
}

impl SyntheticAdapter {
    pub fn new(kind: SyntheticKind, topic: impl Into<String>, limit: usize) -> Self {
        Self {
            kind,
            topic: topic.into(),
            limit,
        }
    }

    fn generate(&self) -> Vec<RawRecord> {
        let slug = self.topic.replace(' ', "-");
        let display = title_case(&self.topic);
        let now = Utc::now();

        match self.kind {
            SyntheticKind::EurLex => (0..self.limit.min(10))
                .map(|i| {
                    let date = now - Duration::days((i as i64) * 2);
                    let mut extra = BTreeMap::new();
                    extra.insert(
                        "celex_number".to_string(),
                        ExtraValue::String(format!("3{}R{}", now.year(), 1000 + i)),
                    );
                    extra.insert(
                        "legal_basis".to_string(),
                        ExtraValue::from("TFEU Article 114"),
                    );

                    RawRecord {
                        native_id: Some(format!("{}-{}", slug, i + 1)),
                        title: format!("EU Regulation on {} - Document {}", display, i + 1),
                        summary: format!(
                            "Official EU regulation addressing {} compliance and implementation across member states.",
                            self.topic
                        ),
                        body_text: String::new(),
                        url: format!("https://eur-lex.europa.eu/eli/{}/{}", slug, i + 1),
                        published: Some(date.format("%Y-%m-%dT%H:%M:%S").to_string()),
                        topics: vec![
                            self.topic.clone(),
                            "regulation".to_string(),
                            "eu-law".to_string(),
                        ],
                        doc_type: if i % 2 == 0 { "regulation" } else { "directive" }.to_string(),
                        language: Some("en".to_string()),
                        extra,
                    }
                })
                .collect(),

            SyntheticKind::Euractiv => (0..self.limit.min(15))
                .map(|i| {
                    let date = now - Duration::days(i as i64 + 1);
                    let mut extra = BTreeMap::new();
                    extra.insert("category".to_string(), ExtraValue::from("Policy"));
                    extra.insert(
                        "author".to_string(),
                        ExtraValue::String(format!("Brussels Correspondent {}", i + 1)),
                    );

                    RawRecord {
                        native_id: Some(format!("{}-{}", slug, i + 1)),
                        title: format!("{} Policy Developments in Brussels", display),
                        summary: format!(
                            "Latest political and policy developments regarding {} initiatives in the European Union.",
                            self.topic
                        ),
                        body_text: String::new(),
                        url: format!("https://www.euractiv.com/{}-policy-{}", slug, i + 1),
                        published: Some(date.format("%Y-%m-%dT%H:%M:%S").to_string()),
                        topics: vec![
                            self.topic.clone(),
                            "politics".to_string(),
                            "eu-policy".to_string(),
                        ],
                        doc_type: "news".to_string(),
                        language: Some("en".to_string()),
                        extra,
                    }
                })
                .collect(),

            SyntheticKind::Parliament => (0..self.limit.min(8))
                .map(|i| {
                    let date = now - Duration::days((i as i64) * 3);
                    let mut extra = BTreeMap::new();
                    extra.insert(
                        "procedure".to_string(),
                        ExtraValue::String(format!("{}/{}(RSP)", now.year(), 2000 + i)),
                    );
                    extra.insert(
                        "committee".to_string(),
                        ExtraValue::from(if self.topic.to_lowercase().contains("environment") {
                            "ENVI"
                        } else {
                            "TRAN"
                        }),
                    );

                    RawRecord {
                        native_id: Some(format!("{}-{}", slug, i + 1)),
                        title: format!("Parliamentary Question on {} Implementation", display),
                        summary: format!(
                            "European Parliament addresses concerns and questions regarding {} policy implementation.",
                            self.topic
                        ),
                        body_text: String::new(),
                        url: format!(
                            "https://www.europarl.europa.eu/doceo/document/E-{}-{}_EN.html",
                            now.year(),
                            1000 + i
                        ),
                        published: Some(date.format("%Y-%m-%dT%H:%M:%S").to_string()),
                        topics: vec![
                            self.topic.clone(),
                            "parliament".to_string(),
                            "oversight".to_string(),
                        ],
                        doc_type: if i % 3 == 0 {
                            "parliamentary_question"
                        } else {
                            "resolution"
                        }
                        .to_string(),
                        language: Some("en".to_string()),
                        extra,
                    }
                })
                .collect(),
        }
    }
}

#[async_trait]
impl SourceAdapter for SyntheticAdapter {
    fn source_name(&self) -> &str {
        match self.kind {
            SyntheticKind::EurLex => "EUR-Lex",
            SyntheticKind::Euractiv => "EURACTIV",
            SyntheticKind::Parliament => "EP Open Data",
        }
    }

    fn id_prefix(&self) -> &str {
        match self.kind {
            SyntheticKind::EurLex => "eurlex",
            SyntheticKind::Euractiv => "euractiv",
            SyntheticKind::Parliament => "ep",
        }
    }

    async fn fetch(&self) -> AppResult<Vec<RawRecord>> {
        Ok(self.generate())
    }
}

/// Capitalize each whitespace-separated word.
fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
