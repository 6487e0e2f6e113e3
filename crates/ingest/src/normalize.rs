//! Raw record normalization.
//!
//! Maps adapter output into the canonical `Document` schema, assigning
//! stable identifiers and default field values. Normalization is pure and
//! idempotent: the same raw record always yields the same id.

use radar_core::Document;

use crate::types::RawRecord;

/// Normalize a raw record into a canonical document.
///
/// The id combines the adapter's prefix with the source-native identifier,
/// or with a slug of the canonical URL when the source provides no native
/// id. The prefix disambiguates across sources, so ids are unique by
/// construction. Field defaults: `language` "en", `topics` [], `extra` {};
/// text fields default to the empty string, never null.
pub fn normalize(raw: RawRecord, source: &str, prefix: &str) -> Document {
    let native = match raw.native_id {
        Some(ref id) if !id.trim().is_empty() => id.trim().to_string(),
        _ => slugify(&raw.url),
    };

    let title = if raw.title.trim().is_empty() {
        "No title provided".to_string()
    } else {
        raw.title
    };

    Document {
        id: format!("{}-{}", prefix, native),
        source: source.to_string(),
        doc_type: raw.doc_type,
        title,
        summary: raw.summary,
        body_text: raw.body_text,
        url: raw.url,
        published: raw.published,
        topics: raw.topics,
        language: raw.language.unwrap_or_else(|| "en".to_string()),
        extra: raw.extra,
    }
}

/// Derive a stable slug from a URL.
///
/// Lowercases, maps every non-alphanumeric run to a single `-`, and trims
/// leading/trailing dashes. Scheme noise ("https://") collapses into the
/// slug head, which is fine — the slug only has to be stable and
/// collision-resistant within one source.
pub fn slugify(url: &str) -> String {
    let mut slug = String::with_capacity(url.len());
    let mut last_dash = true;

    for c in url.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            last_dash = false;
        } else if !last_dash {
            slug.push('-');
            last_dash = true;
        }
    }

    let trimmed = slug.trim_matches('-').to_string();
    if trimmed.is_empty() {
        "unknown".to_string()
    } else {
        trimmed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(native_id: Option<&str>, url: &str) -> RawRecord {
        RawRecord {
            native_id: native_id.map(|s| s.to_string()),
            title: "A title".to_string(),
            url: url.to_string(),
            doc_type: "news".to_string(),
            ..RawRecord::default()
        }
    }

    #[test]
    fn test_id_combines_prefix_and_native_id() {
        let doc = normalize(raw(Some("12345"), "https://example.org/a"), "EUR-Lex", "eurlex");
        assert_eq!(doc.id, "eurlex-12345");
        assert_eq!(doc.source, "EUR-Lex");
    }

    #[test]
    fn test_id_falls_back_to_url_slug() {
        let doc = normalize(
            raw(None, "https://example.org/Energy/item?id=7"),
            "EURACTIV",
            "euractiv",
        );
        assert_eq!(doc.id, "euractiv-https-example-org-energy-item-id-7");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let a = normalize(raw(Some("x1"), "https://example.org"), "S", "s");
        let b = normalize(raw(Some("x1"), "https://example.org"), "S", "s");
        assert_eq!(a.id, b.id);
        assert!(!a.id.is_empty());
    }

    #[test]
    fn test_defaults_applied() {
        let doc = normalize(raw(Some("1"), ""), "S", "s");
        assert_eq!(doc.language, "en");
        assert!(doc.topics.is_empty());
        assert!(doc.extra.is_empty());
        assert_eq!(doc.summary, "");
        assert_eq!(doc.body_text, "");
    }

    #[test]
    fn test_empty_title_gets_placeholder() {
        let mut record = raw(Some("1"), "");
        record.title = "  ".to_string();
        let doc = normalize(record, "S", "s");
        assert_eq!(doc.title, "No title provided");
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("https://example.org/a/b"), "https-example-org-a-b");
        assert_eq!(slugify("///"), "unknown");
        assert_eq!(slugify("ABC--def"), "abc-def");
    }
}
