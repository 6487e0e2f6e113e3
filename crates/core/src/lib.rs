//! Policy Radar Core Library
//!
//! This crate provides the foundational pieces shared by every Policy Radar
//! component:
//! - Error handling (`AppError`, `AppResult`)
//! - Logging infrastructure
//! - Configuration management
//! - The canonical `Document` model
//! - Durable storage formats (JSONL + binary snapshot)

pub mod config;
pub mod document;
pub mod error;
pub mod logging;
pub mod storage;

// Re-export commonly used types
pub use config::{AppConfig, PersistMode};
pub use document::{Document, ExtraValue};
pub use error::{AppError, AppResult};
