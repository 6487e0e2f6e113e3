//! HTTP API for the document service.
//!
//! A thin axum layer over the store and the query engine. Handlers take a
//! point-in-time snapshot of the collection, so a concurrent ingest never
//! changes a response mid-flight. Data problems surface as empty results or
//! 4xx, never 5xx.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

use radar_core::{storage, AppConfig, AppError, AppResult};
use radar_engine::{aggregate, respond, source_counts, topic_counts, DocumentFilter, DocumentStore};
use radar_ingest::{fetch_all, SourceAdapter, SyntheticAdapter, SyntheticKind};

/// Default lookback window for `/api/documents` when `days` is absent.
const DEFAULT_DAYS: i64 = 30;

/// Default result cap for `/api/documents` when `limit` is absent.
const DEFAULT_LIMIT: usize = 100;

/// Default batch size per synthetic source for `/api/ingest`.
const DEFAULT_INGEST_LIMIT: usize = 50;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<DocumentStore>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(store: DocumentStore, config: AppConfig) -> Self {
        Self {
            store: Arc::new(store),
            config: Arc::new(config),
        }
    }
}

pub fn app_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/api/health", get(api_health))
        .route("/api/documents", get(list_documents))
        .route("/api/stats", get(stats))
        .route("/api/topics", get(topics))
        .route("/api/sources", get(sources))
        .route("/api/rag/query", post(rag_query))
        .route("/api/ingest", post(ingest))
        .with_state(state)
        .layer(cors)
}

/// Load the store and serve the API until the process is stopped.
pub async fn run_server(config: AppConfig) -> AppResult<()> {
    let store = DocumentStore::load(&config);
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .map_err(|_| {
            AppError::Config(format!(
                "invalid bind address {}:{}",
                config.host, config.port
            ))
        })?;

    let app = app_router(AppState::new(store, config));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Policy Radar API listening on http://{}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}

async fn index(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "name": "Policy Radar",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running",
        "documents": state.store.len(),
        "endpoints": {
            "health": "/api/health",
            "documents": "/api/documents",
            "stats": "/api/stats",
            "topics": "/api/topics",
            "sources": "/api/sources",
            "rag_query": "/api/rag/query",
            "ingest": "/api/ingest",
        },
    }))
}

async fn health() -> impl IntoResponse {
    Json(json!({"status": "healthy"}))
}

async fn api_health(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "documents": state.store.len(),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[derive(Debug, Deserialize)]
struct DocumentsParams {
    topic: Option<String>,
    source: Option<String>,
    doc_type: Option<String>,
    search: Option<String>,
    days: Option<i64>,
    limit: Option<usize>,
}

async fn list_documents(
    State(state): State<AppState>,
    Query(params): Query<DocumentsParams>,
) -> impl IntoResponse {
    let mut filter = DocumentFilter::new()
        .with_days(params.days.unwrap_or(DEFAULT_DAYS))
        .with_limit(params.limit.unwrap_or(DEFAULT_LIMIT));

    if let Some(topic) = params.topic {
        filter = filter.with_topic(topic);
    }
    if let Some(source) = params.source {
        filter = filter.with_source(source);
    }
    if let Some(doc_type) = params.doc_type {
        filter = filter.with_doc_type(doc_type);
    }
    if let Some(search) = params.search {
        filter = filter.with_search(search);
    }

    let documents = state.store.snapshot();
    let (matched, total) = filter.apply(&documents);

    Json(json!({
        "documents": matched,
        "total": total,
    }))
}

async fn stats(State(state): State<AppState>) -> impl IntoResponse {
    let documents = state.store.snapshot();
    Json(aggregate(&documents))
}

async fn topics(State(state): State<AppState>) -> impl IntoResponse {
    let documents = state.store.snapshot();
    Json(json!({"topics": topic_counts(&documents)}))
}

async fn sources(State(state): State<AppState>) -> impl IntoResponse {
    let documents = state.store.snapshot();
    Json(json!({"sources": source_counts(&documents)}))
}

#[derive(Debug, Deserialize)]
struct RagRequest {
    query: Option<String>,
}

async fn rag_query(
    State(state): State<AppState>,
    body: Result<Json<RagRequest>, JsonRejection>,
) -> Result<impl IntoResponse, (StatusCode, Json<serde_json::Value>)> {
    let query = match body {
        Ok(Json(RagRequest { query: Some(q) })) if !q.trim().is_empty() => q,
        Ok(_) => return Err(bad_request("query is required")),
        Err(rejection) => return Err(bad_request(&rejection.body_text())),
    };

    let documents = state.store.snapshot();
    Ok(Json(respond(&documents, &query)))
}

#[derive(Debug, Deserialize)]
struct IngestRequest {
    topic: Option<String>,
    sources: Option<Vec<String>>,
    limit: Option<usize>,
}

async fn ingest(
    State(state): State<AppState>,
    body: Result<Json<IngestRequest>, JsonRejection>,
) -> Result<impl IntoResponse, (StatusCode, Json<serde_json::Value>)> {
    let request = match body {
        Ok(Json(request)) => request,
        Err(rejection) => return Err(bad_request(&rejection.body_text())),
    };

    let topic = match request.topic {
        Some(t) if !t.trim().is_empty() => t,
        _ => return Err(bad_request("topic is required")),
    };
    let limit = request.limit.unwrap_or(DEFAULT_INGEST_LIMIT);

    let kinds: Vec<SyntheticKind> = match request.sources {
        Some(names) => names
            .iter()
            .filter_map(|name| SyntheticKind::from_request_name(name))
            .collect(),
        None => SyntheticKind::all().to_vec(),
    };
    if kinds.is_empty() {
        return Err(bad_request("no recognized sources requested"));
    }

    // The requested limit is a total budget, split evenly across the
    // resolved sources.
    let per_source = limit / kinds.len();
    let adapters: Vec<Box<dyn SourceAdapter>> = kinds
        .into_iter()
        .map(|kind| {
            Box::new(SyntheticAdapter::new(kind, &topic, per_source)) as Box<dyn SourceAdapter>
        })
        .collect();

    let timeout = Duration::from_secs(state.config.adapter_timeout_secs);
    let (batch, report) = fetch_all(&adapters, timeout).await;
    let added = state.store.merge(batch);

    persist_store(&state);

    Ok(Json(json!({
        "status": "success",
        "message": format!("Ingested {} new documents for topic '{}'", added, topic),
        "results": {
            "ingested_by_source": report.ingested_by_source,
            "errors": report.errors,
            "total_new_documents": added,
        },
        "total_documents_now": state.store.len(),
    })))
}

/// Write the current collection back to disk. Persistence failures are
/// logged; the in-memory store already carries the merged collection.
fn persist_store(state: &AppState) {
    let documents = state.store.snapshot();

    let result = state
        .config
        .ensure_dirs()
        .and_then(|_| storage::write_jsonl(&state.config.items_path(), &documents));
    if let Err(e) = result {
        warn!("Failed to persist document store: {}", e);
        return;
    }

    if let Err(e) = storage::write_snapshot(&state.config.snapshot_path(), &documents) {
        warn!("Failed to refresh snapshot: {}", e);
    }
}

fn bad_request(message: &str) -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({"error": message})),
    )
}
