//! Keyword-overlap response generator.
//!
//! A deliberately naive placeholder, not retrieval ranking: a document is
//! relevant when any token of the lower-cased query appears as a substring
//! of its lower-cased title + summary + topics, selection is capped at five
//! documents in store order, and the response text is one of a small fixed
//! set of templates keyed on trigger keywords.

use radar_core::Document;
use serde::{Deserialize, Serialize};

/// Maximum number of documents cited in a response.
const MAX_SOURCES: usize = 5;

/// The relevance score is a constant placeholder, not a computed rank.
const RELEVANCE_PLACEHOLDER: f64 = 0.8;

/// A cited document reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceRef {
    pub id: String,
    pub title: String,
    pub relevance_score: f64,
}

/// Generated answer plus the documents it cites.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RagAnswer {
    pub response: String,
    pub sources: Vec<SourceRef>,
}

/// Generate a canned response for a free-text query.
pub fn respond(documents: &[Document], query: &str) -> RagAnswer {
    let query_lower = query.to_lowercase();
    let tokens: Vec<&str> = query_lower.split_whitespace().collect();

    let relevant: Vec<&Document> = documents
        .iter()
        .filter(|d| {
            let haystack = format!(
                "{} {} {}",
                d.title,
                d.summary,
                d.topics.join(" ")
            )
            .to_lowercase();
            tokens.iter().any(|token| haystack.contains(token))
        })
        .take(MAX_SOURCES)
        .collect();

    let response = render_template(&query_lower, relevant.len());

    let sources = relevant
        .iter()
        .map(|d| SourceRef {
            id: d.id.clone(),
            title: d.title.clone(),
            relevance_score: RELEVANCE_PLACEHOLDER,
        })
        .collect();

    RagAnswer { response, sources }
}

/// Pick the canned template for the query's trigger keyword.
fn render_template(query_lower: &str, relevant_count: usize) -> String {
    if query_lower.contains("hydrogen") {
        format!(
            "Based on Policy Radar data, here are key hydrogen developments:\n\n\
             **Regulatory Updates:**\n\
             - New EU hydrogen certification framework for transport\n\
             - Updated safety standards for storage and transportation\n\
             - Commission decisions on technical protocols\n\n\
             **Market Developments:**\n\
             - Germany's 2bn euro transport initiative announced\n\
             - Focus on hydrogen fuel cell trucks and buses\n\
             - Investment in refueling infrastructure\n\n\
             **Legislative Progress:**\n\
             - Alternative fuels infrastructure deployment advancing\n\
             - TRAN Committee reviewing transport policies\n\n\
             **Sources:** {} relevant documents found.",
            relevant_count
        )
    } else if query_lower.contains("electric") {
        format!(
            "Electric vehicle developments from Policy Radar:\n\n\
             **Market Growth:**\n\
             - EV sales surged 40% in Q2 2024\n\
             - Driven by infrastructure and incentives\n\
             - Consumer confidence at all-time high\n\n\
             **Infrastructure Policy:**\n\
             - EU-wide charging network expansion\n\
             - Interoperability standards development\n\
             - Integration with renewable energy\n\n\
             **Sources:** {} documents analyzed.",
            relevant_count
        )
    } else {
        format!(
            "Found {} relevant documents covering:\n\
             - Sustainable transport policy\n\
             - Clean energy technologies\n\
             - Infrastructure development\n\
             - Regulatory frameworks\n\n\
             The EU is actively pursuing integrated clean transport policies with significant support.",
            relevant_count
        )
    }
}
