//! Built-in sample documents.
//!
//! Used as the last resort in the store's startup fallback chain, so the
//! serving API is never empty on a first run.

use std::collections::BTreeMap;

use radar_core::Document;

/// The built-in sample set: one document per source family.
pub fn sample_documents() -> Vec<Document> {
    vec![
        Document {
            id: "sample-1".to_string(),
            source: "EUR-Lex".to_string(),
            doc_type: "strategy".to_string(),
            title: "EU Hydrogen Strategy for a Climate-Neutral Europe".to_string(),
            summary: "The European Commission presents its strategy for hydrogen to help EU reach carbon neutrality by 2050.".to_string(),
            body_text: String::new(),
            url: "https://eur-lex.europa.eu/legal-content/EN/TXT/?uri=CELEX:52020DC0301".to_string(),
            published: Some("2025-08-18T00:00:00".to_string()),
            topics: vec!["hydrogen".to_string(), "climate".to_string(), "energy".to_string()],
            language: "en".to_string(),
            extra: BTreeMap::new(),
        },
        Document {
            id: "sample-2".to_string(),
            source: "EURACTIV".to_string(),
            doc_type: "news".to_string(),
            title: "Clean Energy Package Implementation in Transport".to_string(),
            summary: "Latest developments in the implementation of clean energy directives for the transport sector.".to_string(),
            body_text: String::new(),
            url: "https://www.euractiv.com/section/transport/".to_string(),
            published: Some("2025-08-19T00:00:00".to_string()),
            topics: vec![
                "transport".to_string(),
                "clean energy".to_string(),
                "electric vehicles".to_string(),
            ],
            language: "en".to_string(),
            extra: BTreeMap::new(),
        },
        Document {
            id: "sample-3".to_string(),
            source: "EP Open Data".to_string(),
            doc_type: "resolution".to_string(),
            title: "European Parliament Resolution on Sustainable Transport".to_string(),
            summary: "Parliament calls for accelerated deployment of sustainable transport solutions across EU member states.".to_string(),
            body_text: String::new(),
            url: "https://www.europarl.europa.eu/doceo/document/".to_string(),
            published: Some("2025-08-17T00:00:00".to_string()),
            topics: vec![
                "transport".to_string(),
                "sustainability".to_string(),
                "parliament".to_string(),
            ],
            language: "en".to_string(),
            extra: BTreeMap::new(),
        },
    ]
}
