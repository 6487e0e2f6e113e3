//! Error types for Policy Radar.
//!
//! This module defines a unified error enum that covers all error categories
//! in the application: configuration, I/O, source adapters, storage, query
//! handling, and serialization.

use thiserror::Error;

/// Unified error type for Policy Radar.
///
/// All fallible functions in the application return `Result<T, AppError>`.
/// We never panic — errors must be represented and propagated.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O and filesystem errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// External source errors (feed unavailable, malformed feed, endpoint
    /// failure). Never fatal to an ingestion run — the affected source
    /// simply contributes zero documents.
    #[error("Source error: {0}")]
    Source(String),

    /// Durable storage errors (JSONL or snapshot unreadable/corrupt)
    #[error("Storage error: {0}")]
    Storage(String),

    /// Query/filter engine errors
    #[error("Query error: {0}")]
    Query(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;
