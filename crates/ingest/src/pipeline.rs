//! Ingestion pipeline.
//!
//! Runs every enabled adapter concurrently with a bounded per-adapter
//! timeout, normalizes the results, and persists them under the configured
//! policy. One failing or slow source never blocks the others' results.

use std::collections::HashSet;
use std::time::Duration;

use futures::future::join_all;
use radar_core::{storage, AppConfig, AppResult, Document, PersistMode};

use crate::adapter::SourceAdapter;
use crate::normalize::normalize;
use crate::types::{IngestReport, SourceCount};

/// Pipeline options.
#[derive(Debug, Clone)]
pub struct IngestOptions {
    /// Persistence policy for this run
    pub mode: PersistMode,

    /// Timeout applied to each adapter's fetch
    pub adapter_timeout: Duration,
}

impl IngestOptions {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            mode: config.persist_mode,
            adapter_timeout: Duration::from_secs(config.adapter_timeout_secs),
        }
    }
}

/// Fetch from all adapters concurrently and normalize the results.
///
/// Returns the combined batch (first occurrence wins on duplicate ids) and
/// a report with per-source counts and error messages. Errors are recorded,
/// never propagated — a failed source contributes zero documents.
pub async fn fetch_all(
    adapters: &[Box<dyn SourceAdapter>],
    adapter_timeout: Duration,
) -> (Vec<Document>, IngestReport) {
    let fetches = adapters.iter().map(|adapter| async move {
        let result = tokio::time::timeout(adapter_timeout, adapter.fetch()).await;
        (adapter.as_ref(), result)
    });

    let outcomes = join_all(fetches).await;

    let mut report = IngestReport::default();
    let mut batch: Vec<Document> = Vec::new();
    let mut seen_ids: HashSet<String> = HashSet::new();

    for (adapter, outcome) in outcomes {
        let source = adapter.source_name().to_string();

        let records = match outcome {
            Ok(Ok(records)) => records,
            Ok(Err(e)) => {
                tracing::error!("Source {} failed: {}", source, e);
                report.errors.push(format!("{}: {}", source, e));
                report.ingested_by_source.push(SourceCount {
                    name: source,
                    count: 0,
                });
                continue;
            }
            Err(_) => {
                tracing::error!(
                    "Source {} timed out after {:?}",
                    source,
                    adapter_timeout
                );
                report.errors.push(format!(
                    "{}: timed out after {}s",
                    source,
                    adapter_timeout.as_secs()
                ));
                report.ingested_by_source.push(SourceCount {
                    name: source,
                    count: 0,
                });
                continue;
            }
        };

        let mut count = 0usize;
        for record in records {
            let document = normalize(record, adapter.source_name(), adapter.id_prefix());
            if seen_ids.insert(document.id.clone()) {
                batch.push(document);
                count += 1;
            } else {
                tracing::warn!("Duplicate id {} within batch, keeping first", document.id);
            }
        }

        tracing::info!("Ingested {} documents from {}", count, source);
        report.ingested_by_source.push(SourceCount {
            name: source,
            count,
        });
    }

    report.total_fetched = batch.len();
    (batch, report)
}

/// Run a full ingestion: fetch, normalize, persist.
///
/// Replace mode overwrites the JSONL file with the batch; merge mode loads
/// the existing collection and appends only documents whose id is not
/// already present. Both refresh the binary snapshot; a snapshot write
/// failure is logged but not fatal (the JSONL is the source of truth).
pub async fn run_ingestion(
    config: &AppConfig,
    adapters: &[Box<dyn SourceAdapter>],
    options: IngestOptions,
) -> AppResult<IngestReport> {
    tracing::info!("Starting ingestion run ({:?} mode)", options.mode);

    let (batch, mut report) = fetch_all(adapters, options.adapter_timeout).await;

    config.ensure_dirs()?;
    let items_path = config.items_path();

    let merged = match options.mode {
        PersistMode::Replace => {
            report.total_new_documents = batch.len();
            batch
        }
        PersistMode::Merge => {
            let existing = if items_path.exists() {
                storage::read_jsonl(&items_path).unwrap_or_else(|e| {
                    tracing::warn!("Discarding unreadable store for merge: {}", e);
                    Vec::new()
                })
            } else {
                Vec::new()
            };

            merge_documents(existing, batch, &mut report)
        }
    };

    report.store_size = merged.len();

    storage::write_jsonl(&items_path, &merged)?;
    if let Err(e) = storage::write_snapshot(&config.snapshot_path(), &merged) {
        tracing::warn!("Failed to refresh snapshot: {}", e);
    }

    tracing::info!(
        "Ingestion run complete: {} new documents, store size {}",
        report.total_new_documents,
        report.store_size
    );

    Ok(report)
}

/// Merge a batch into an existing collection, de-duplicating by exact id.
pub fn merge_documents(
    existing: Vec<Document>,
    batch: Vec<Document>,
    report: &mut IngestReport,
) -> Vec<Document> {
    let existing_ids: HashSet<String> = existing.iter().map(|d| d.id.clone()).collect();

    let mut merged = existing;
    let mut new_count = 0usize;

    for document in batch {
        if !existing_ids.contains(&document.id) {
            merged.push(document);
            new_count += 1;
        }
    }

    report.total_new_documents = new_count;
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RawRecord;
    use async_trait::async_trait;
    use radar_core::AppError;

    struct StubAdapter {
        name: &'static str,
        prefix: &'static str,
        records: Vec<RawRecord>,
        fail: bool,
    }

    impl StubAdapter {
        fn ok(name: &'static str, prefix: &'static str, ids: &[&str]) -> Self {
            let records = ids
                .iter()
                .map(|id| RawRecord {
                    native_id: Some(id.to_string()),
                    title: format!("Title {}", id),
                    doc_type: "news".to_string(),
                    ..RawRecord::default()
                })
                .collect();
            Self {
                name,
                prefix,
                records,
                fail: false,
            }
        }

        fn failing(name: &'static str, prefix: &'static str) -> Self {
            Self {
                name,
                prefix,
                records: vec![],
                fail: true,
            }
        }
    }

    #[async_trait]
    impl SourceAdapter for StubAdapter {
        fn source_name(&self) -> &str {
            self.name
        }

        fn id_prefix(&self) -> &str {
            self.prefix
        }

        async fn fetch(&self) -> AppResult<Vec<RawRecord>> {
            if self.fail {
                Err(AppError::Source("endpoint unreachable".to_string()))
            } else {
                Ok(self.records.clone())
            }
        }
    }

    fn test_config(dir: &std::path::Path) -> AppConfig {
        let mut config = AppConfig::default();
        config.data_dir = dir.join("data");
        config.vectors_dir = dir.join("vectors");
        config
    }

    #[tokio::test]
    async fn test_one_failed_adapter_does_not_block_others() {
        let adapters: Vec<Box<dyn SourceAdapter>> = vec![
            Box::new(StubAdapter::failing("Broken", "broken")),
            Box::new(StubAdapter::ok("Fine", "fine", &["1", "2"])),
        ];

        let (batch, report) = fetch_all(&adapters, Duration::from_secs(5)).await;

        assert_eq!(batch.len(), 2);
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].starts_with("Broken:"));
        assert_eq!(report.ingested_by_source.len(), 2);
        assert_eq!(report.ingested_by_source[0].count, 0);
        assert_eq!(report.ingested_by_source[1].count, 2);
    }

    #[tokio::test]
    async fn test_replace_mode_overwrites_store() {
        let temp = tempfile::tempdir().unwrap();
        let config = test_config(temp.path());

        let first: Vec<Box<dyn SourceAdapter>> =
            vec![Box::new(StubAdapter::ok("S", "s", &["a", "b"]))];
        let second: Vec<Box<dyn SourceAdapter>> =
            vec![Box::new(StubAdapter::ok("S", "s", &["c"]))];

        let options = IngestOptions {
            mode: PersistMode::Replace,
            adapter_timeout: Duration::from_secs(5),
        };

        run_ingestion(&config, &first, options.clone()).await.unwrap();
        let report = run_ingestion(&config, &second, options).await.unwrap();

        assert_eq!(report.store_size, 1);
        let stored = storage::read_jsonl(&config.items_path()).unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].id, "s-c");
    }

    #[tokio::test]
    async fn test_merge_mode_dedupes_by_id() {
        let temp = tempfile::tempdir().unwrap();
        let config = test_config(temp.path());

        let adapters: Vec<Box<dyn SourceAdapter>> =
            vec![Box::new(StubAdapter::ok("S", "s", &["a", "b"]))];

        let options = IngestOptions {
            mode: PersistMode::Merge,
            adapter_timeout: Duration::from_secs(5),
        };

        let first = run_ingestion(&config, &adapters, options.clone()).await.unwrap();
        assert_eq!(first.total_new_documents, 2);
        assert_eq!(first.store_size, 2);

        // Second run with the same ids adds nothing; the store never shrinks
        let second = run_ingestion(&config, &adapters, options).await.unwrap();
        assert_eq!(second.total_new_documents, 0);
        assert_eq!(second.store_size, 2);

        let stored = storage::read_jsonl(&config.items_path()).unwrap();
        let unique: std::collections::HashSet<_> = stored.iter().map(|d| &d.id).collect();
        assert_eq!(unique.len(), stored.len());
    }

    #[tokio::test]
    async fn test_batch_duplicate_ids_keep_first() {
        let adapters: Vec<Box<dyn SourceAdapter>> =
            vec![Box::new(StubAdapter::ok("S", "s", &["a", "a", "b"]))];

        let (batch, report) = fetch_all(&adapters, Duration::from_secs(5)).await;
        assert_eq!(batch.len(), 2);
        assert_eq!(report.ingested_by_source[0].count, 2);
    }

    #[tokio::test]
    async fn test_snapshot_written_alongside_jsonl() {
        let temp = tempfile::tempdir().unwrap();
        let config = test_config(temp.path());

        let adapters: Vec<Box<dyn SourceAdapter>> =
            vec![Box::new(StubAdapter::ok("S", "s", &["a"]))];

        let options = IngestOptions {
            mode: PersistMode::Replace,
            adapter_timeout: Duration::from_secs(5),
        };

        run_ingestion(&config, &adapters, options).await.unwrap();

        let snapshot = storage::read_snapshot(&config.snapshot_path()).unwrap();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].id, "s-a");
    }
}
