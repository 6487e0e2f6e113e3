//! Read-mostly document store.
//!
//! Holds the full document collection behind an atomically swapped `Arc`.
//! Readers take a cheap snapshot and never block the writer; the writer
//! builds the new collection off to the side and publishes it in one swap,
//! so readers never observe a partially updated collection.
//!
//! Startup load order: binary snapshot, then JSONL, then the built-in
//! sample set. A corrupt or missing file cascades to the next fallback —
//! loading never fails.

use std::sync::{Arc, RwLock};

use radar_core::{storage, AppConfig, Document};

use crate::sample;

/// The canonical in-memory collection of documents.
pub struct DocumentStore {
    inner: RwLock<Arc<Vec<Document>>>,
}

impl DocumentStore {
    /// Create a store from an already-loaded collection.
    pub fn new(documents: Vec<Document>) -> Self {
        Self {
            inner: RwLock::new(Arc::new(documents)),
        }
    }

    /// Load the store from durable storage with the fallback chain.
    pub fn load(config: &AppConfig) -> Self {
        let documents = load_documents(config);
        tracing::info!("Document store loaded with {} documents", documents.len());
        Self::new(documents)
    }

    /// Take a point-in-time snapshot of the collection.
    pub fn snapshot(&self) -> Arc<Vec<Document>> {
        // A poisoned lock only means a writer panicked mid-swap; the data
        // behind the Arc is still the last published collection.
        let guard = self.inner.read().unwrap_or_else(|e| e.into_inner());
        Arc::clone(&guard)
    }

    /// Number of documents currently in the store.
    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Replace the whole collection in one atomic swap.
    pub fn replace(&self, documents: Vec<Document>) {
        let mut guard = self.inner.write().unwrap_or_else(|e| e.into_inner());
        *guard = Arc::new(documents);
    }

    /// Merge a batch into the collection, de-duplicating by exact id.
    ///
    /// Returns the number of documents actually added. The new collection
    /// is built fully before being published.
    pub fn merge(&self, batch: Vec<Document>) -> usize {
        let mut guard = self.inner.write().unwrap_or_else(|e| e.into_inner());

        let existing_ids: std::collections::HashSet<&str> =
            guard.iter().map(|d| d.id.as_str()).collect();

        let new_documents: Vec<Document> = batch
            .into_iter()
            .filter(|d| !existing_ids.contains(d.id.as_str()))
            .collect();

        if new_documents.is_empty() {
            return 0;
        }

        let mut merged = guard.as_ref().clone();
        let added = new_documents.len();
        merged.extend(new_documents);
        *guard = Arc::new(merged);
        added
    }
}

/// Run the fallback chain: snapshot → JSONL → samples.
fn load_documents(config: &AppConfig) -> Vec<Document> {
    let snapshot_path = config.snapshot_path();
    if snapshot_path.exists() {
        match storage::read_snapshot(&snapshot_path) {
            Ok(documents) => {
                tracing::info!("Loaded {} documents from snapshot", documents.len());
                return documents;
            }
            Err(e) => tracing::warn!("Snapshot unreadable, falling back to JSONL: {}", e),
        }
    }

    let items_path = config.items_path();
    if items_path.exists() {
        match storage::read_jsonl(&items_path) {
            Ok(documents) => {
                tracing::info!("Loaded {} documents from JSONL", documents.len());
                return documents;
            }
            Err(e) => tracing::warn!("JSONL unreadable, falling back to samples: {}", e),
        }
    }

    tracing::info!("No stored documents found, using built-in sample set");
    sample::sample_documents()
}
