//! Durable storage formats for the document collection.
//!
//! Two representations are kept side by side:
//! - `items.jsonl` — one Document per line, UTF-8. The interoperable source
//!   of truth; always written on a successful ingestion run.
//! - `documents.bin` — bincode snapshot of the whole collection. A fast-path
//!   cache only; rebuilt from the JSONL whenever the two disagree.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::document::Document;
use crate::error::{AppError, AppResult};

/// On-disk layout of one snapshot record.
///
/// bincode is not self-describing and cannot decode the untagged `extra`
/// values, so that map is carried as its JSON text. Every other field is a
/// bincode-safe scalar or list.
#[derive(Serialize, Deserialize)]
struct SnapshotRecord {
    id: String,
    source: String,
    doc_type: String,
    title: String,
    summary: String,
    body_text: String,
    url: String,
    published: Option<String>,
    topics: Vec<String>,
    language: String,
    extra_json: String,
}

impl SnapshotRecord {
    fn from_document(document: &Document) -> AppResult<Self> {
        let extra_json = serde_json::to_string(&document.extra)
            .map_err(|e| AppError::Storage(format!("Failed to serialize extra fields: {}", e)))?;
        Ok(Self {
            id: document.id.clone(),
            source: document.source.clone(),
            doc_type: document.doc_type.clone(),
            title: document.title.clone(),
            summary: document.summary.clone(),
            body_text: document.body_text.clone(),
            url: document.url.clone(),
            published: document.published.clone(),
            topics: document.topics.clone(),
            language: document.language.clone(),
            extra_json,
        })
    }

    fn into_document(self) -> AppResult<Document> {
        let extra = serde_json::from_str(&self.extra_json)
            .map_err(|e| AppError::Storage(format!("Corrupt extra fields in snapshot: {}", e)))?;
        Ok(Document {
            id: self.id,
            source: self.source,
            doc_type: self.doc_type,
            title: self.title,
            summary: self.summary,
            body_text: self.body_text,
            url: self.url,
            published: self.published,
            topics: self.topics,
            language: self.language,
            extra,
        })
    }
}

/// Read the full document collection from a JSONL file.
///
/// Blank lines are skipped. A malformed line fails the whole read — callers
/// treat that as a storage failure and fall back to the next source.
pub fn read_jsonl(path: &Path) -> AppResult<Vec<Document>> {
    let file = File::open(path)
        .map_err(|e| AppError::Storage(format!("Failed to open {:?}: {}", path, e)))?;

    let reader = BufReader::new(file);
    let mut documents = Vec::new();

    for (line_num, line) in reader.lines().enumerate() {
        let line = line
            .map_err(|e| AppError::Storage(format!("Failed to read line {}: {}", line_num + 1, e)))?;

        if line.trim().is_empty() {
            continue;
        }

        let document: Document = serde_json::from_str(&line).map_err(|e| {
            AppError::Storage(format!(
                "Failed to parse line {} in {:?}: {}",
                line_num + 1,
                path,
                e
            ))
        })?;

        documents.push(document);
    }

    tracing::debug!("Read {} documents from {:?}", documents.len(), path);
    Ok(documents)
}

/// Write the full document collection to a JSONL file, overwriting any
/// previous contents.
pub fn write_jsonl(path: &Path, documents: &[Document]) -> AppResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = File::create(path)
        .map_err(|e| AppError::Storage(format!("Failed to create {:?}: {}", path, e)))?;
    let mut writer = BufWriter::new(file);

    for document in documents {
        let line = serde_json::to_string(document)
            .map_err(|e| AppError::Storage(format!("Failed to serialize document: {}", e)))?;
        writeln!(writer, "{}", line)
            .map_err(|e| AppError::Storage(format!("Failed to write to {:?}: {}", path, e)))?;
    }

    writer
        .flush()
        .map_err(|e| AppError::Storage(format!("Failed to flush {:?}: {}", path, e)))?;

    tracing::debug!("Wrote {} documents to {:?}", documents.len(), path);
    Ok(())
}

/// Read the document collection from a binary snapshot.
pub fn read_snapshot(path: &Path) -> AppResult<Vec<Document>> {
    let bytes = std::fs::read(path)
        .map_err(|e| AppError::Storage(format!("Failed to read snapshot {:?}: {}", path, e)))?;

    let records: Vec<SnapshotRecord> = bincode::deserialize(&bytes)
        .map_err(|e| AppError::Storage(format!("Corrupt snapshot {:?}: {}", path, e)))?;

    let documents = records
        .into_iter()
        .map(SnapshotRecord::into_document)
        .collect::<AppResult<Vec<Document>>>()?;

    tracing::debug!("Read {} documents from snapshot {:?}", documents.len(), path);
    Ok(documents)
}

/// Write the document collection to a binary snapshot.
pub fn write_snapshot(path: &Path, documents: &[Document]) -> AppResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let records = documents
        .iter()
        .map(SnapshotRecord::from_document)
        .collect::<AppResult<Vec<SnapshotRecord>>>()?;

    let bytes = bincode::serialize(&records)
        .map_err(|e| AppError::Storage(format!("Failed to serialize snapshot: {}", e)))?;

    std::fs::write(path, bytes)
        .map_err(|e| AppError::Storage(format!("Failed to write snapshot {:?}: {}", path, e)))?;

    tracing::debug!("Wrote {} documents to snapshot {:?}", documents.len(), path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_doc(id: &str, published: Option<&str>) -> Document {
        Document {
            id: id.to_string(),
            source: "EURACTIV".to_string(),
            doc_type: "news".to_string(),
            title: format!("Title {}", id),
            summary: "A summary".to_string(),
            body_text: "Body".to_string(),
            url: format!("https://example.org/{}", id),
            published: published.map(|s| s.to_string()),
            topics: vec!["energy".to_string()],
            language: "en".to_string(),
            extra: std::collections::BTreeMap::new(),
        }
    }

    #[test]
    fn test_jsonl_round_trip() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("items.jsonl");

        let docs = vec![
            sample_doc("a", Some("2024-01-01T00:00:00")),
            sample_doc("b", None),
        ];

        write_jsonl(&path, &docs).unwrap();
        let restored = read_jsonl(&path).unwrap();
        assert_eq!(docs, restored);
    }

    #[test]
    fn test_jsonl_skips_blank_lines() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("items.jsonl");

        let line = serde_json::to_string(&sample_doc("a", None)).unwrap();
        std::fs::write(&path, format!("{}\n\n\n", line)).unwrap();

        let restored = read_jsonl(&path).unwrap();
        assert_eq!(restored.len(), 1);
        assert_eq!(restored[0].id, "a");
    }

    #[test]
    fn test_jsonl_malformed_line_is_storage_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("items.jsonl");
        std::fs::write(&path, "{not json}\n").unwrap();

        let result = read_jsonl(&path);
        assert!(matches!(result, Err(AppError::Storage(_))));
    }

    #[test]
    fn test_jsonl_overwrites_previous_contents() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("items.jsonl");

        write_jsonl(&path, &[sample_doc("a", None), sample_doc("b", None)]).unwrap();
        write_jsonl(&path, &[sample_doc("c", None)]).unwrap();

        let restored = read_jsonl(&path).unwrap();
        assert_eq!(restored.len(), 1);
        assert_eq!(restored[0].id, "c");
    }

    #[test]
    fn test_snapshot_round_trip() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("documents.bin");

        let mut with_extra = sample_doc("a", Some("2024-06-01"));
        with_extra.extra.insert(
            "celex_number".to_string(),
            crate::document::ExtraValue::from("32024R1000"),
        );

        let docs = vec![with_extra, sample_doc("b", None)];
        write_snapshot(&path, &docs).unwrap();
        let restored = read_snapshot(&path).unwrap();
        assert_eq!(docs, restored);
    }

    #[test]
    fn test_snapshot_corrupt_is_storage_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("documents.bin");
        std::fs::write(&path, b"definitely not bincode").unwrap();

        assert!(matches!(read_snapshot(&path), Err(AppError::Storage(_))));
    }
}
