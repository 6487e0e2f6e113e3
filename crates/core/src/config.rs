//! Configuration management for Policy Radar.
//!
//! This module handles loading and merging configuration from multiple
//! sources:
//! - Environment variables (`RADAR_*`)
//! - Command-line flags
//! - Config file (radar.yaml)
//!
//! Precedence: CLI flags > environment variables > config file > defaults.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::{AppError, AppResult};

/// Persistence policy for an ingestion run.
///
/// The two deployment variants of the original service diverged here, so
/// both are first-class: `Replace` overwrites the JSONL file with the latest
/// batch (stateless re-run), `Merge` adds only documents whose id is not
/// already present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PersistMode {
    Replace,
    Merge,
}

impl FromStr for PersistMode {
    type Err = AppError;

    fn from_str(s: &str) -> AppResult<Self> {
        match s.to_ascii_lowercase().as_str() {
            "replace" => Ok(PersistMode::Replace),
            "merge" => Ok(PersistMode::Merge),
            other => Err(AppError::Config(format!(
                "Unknown persist mode: {}. Supported: replace, merge",
                other
            ))),
        }
    }
}

/// Main application configuration.
///
/// This struct holds all global configuration options shared by the CLI
/// and the HTTP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory holding the JSONL document file
    pub data_dir: PathBuf,

    /// Directory holding the binary snapshot cache
    pub vectors_dir: PathBuf,

    /// Optional config file path
    pub config_file: Option<PathBuf>,

    /// Bind host for the HTTP server
    pub host: String,

    /// Bind port for the HTTP server
    pub port: u16,

    /// RSS feed URL for the news adapter
    pub feed_url: String,

    /// SPARQL endpoint URL for the legal-database adapter
    pub sparql_endpoint: String,

    /// Time window in days for the SPARQL adapter's date predicate
    pub window_days: i64,

    /// Result cap for the SPARQL adapter
    pub result_limit: u32,

    /// Per-adapter timeout in seconds during an ingestion run
    pub adapter_timeout_secs: u64,

    /// Default persistence policy for CLI-driven ingestion runs
    pub persist_mode: PersistMode,

    /// Log level override
    pub log_level: Option<String>,

    /// Verbose mode (enables debug logging)
    pub verbose: bool,

    /// Disable colored output
    pub no_color: bool,
}

/// Full configuration file structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ConfigFile {
    ingestion: Option<IngestionConfig>,
    server: Option<ServerConfig>,
    storage: Option<StorageConfig>,
    logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct IngestionConfig {
    feed_url: Option<String>,
    sparql_endpoint: Option<String>,
    window_days: Option<i64>,
    result_limit: Option<u32>,
    adapter_timeout_secs: Option<u64>,
    persist_mode: Option<PersistMode>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ServerConfig {
    host: Option<String>,
    port: Option<u16>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StorageConfig {
    data_dir: Option<String>,
    vectors_dir: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LoggingConfig {
    level: Option<String>,
    color: Option<bool>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            vectors_dir: PathBuf::from("./vectors"),
            config_file: None,
            host: "0.0.0.0".to_string(),
            port: 8000,
            feed_url: "https://www.euractiv.com/feed/".to_string(),
            sparql_endpoint: "http://publications.europa.eu/webapi/rdf/sparql".to_string(),
            window_days: 365,
            result_limit: 50,
            adapter_timeout_secs: 30,
            persist_mode: PersistMode::Replace,
            log_level: None,
            verbose: false,
            no_color: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables and defaults.
    ///
    /// Environment variables:
    /// - `RADAR_DATA_DIR`: Directory for the JSONL document file
    /// - `RADAR_VECTORS_DIR`: Directory for the binary snapshot
    /// - `RADAR_CONFIG`: Path to config file
    /// - `RADAR_HOST` / `RADAR_PORT`: HTTP bind address
    /// - `RADAR_FEED_URL`: RSS feed URL
    /// - `RADAR_SPARQL_ENDPOINT`: SPARQL endpoint URL
    /// - `RUST_LOG`: Log level
    /// - `NO_COLOR`: Disable colored output
    pub fn load() -> AppResult<Self> {
        let mut config = Self::default();

        if let Ok(data_dir) = std::env::var("RADAR_DATA_DIR") {
            config.data_dir = PathBuf::from(data_dir);
        }

        if let Ok(vectors_dir) = std::env::var("RADAR_VECTORS_DIR") {
            config.vectors_dir = PathBuf::from(vectors_dir);
        }

        if let Ok(config_file) = std::env::var("RADAR_CONFIG") {
            config.config_file = Some(PathBuf::from(config_file));
        }

        // Load from YAML config file if it exists
        let config_path = if let Some(ref cf) = config.config_file {
            cf.clone()
        } else {
            PathBuf::from("radar.yaml")
        };

        if config_path.exists() {
            config = config.merge_yaml(&config_path)?;
        }

        // Environment variables override YAML config
        if let Ok(host) = std::env::var("RADAR_HOST") {
            config.host = host;
        }

        if let Ok(port) = std::env::var("RADAR_PORT") {
            config.port = port
                .parse()
                .map_err(|_| AppError::Config(format!("Invalid RADAR_PORT: {}", port)))?;
        }

        if let Ok(feed_url) = std::env::var("RADAR_FEED_URL") {
            config.feed_url = feed_url;
        }

        if let Ok(endpoint) = std::env::var("RADAR_SPARQL_ENDPOINT") {
            config.sparql_endpoint = endpoint;
        }

        config.log_level = std::env::var("RUST_LOG").ok();

        if std::env::var("NO_COLOR").is_ok() {
            config.no_color = true;
        }

        Ok(config)
    }

    /// Merge YAML configuration file into this config.
    fn merge_yaml(&self, path: &PathBuf) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        let config_file: ConfigFile = serde_yaml::from_str(&contents).map_err(|e| {
            AppError::Config(format!("Failed to parse config file {:?}: {}", path, e))
        })?;

        let mut result = self.clone();

        if let Some(storage) = config_file.storage {
            if let Some(data_dir) = storage.data_dir {
                result.data_dir = PathBuf::from(data_dir);
            }
            if let Some(vectors_dir) = storage.vectors_dir {
                result.vectors_dir = PathBuf::from(vectors_dir);
            }
        }

        if let Some(server) = config_file.server {
            if let Some(host) = server.host {
                result.host = host;
            }
            if let Some(port) = server.port {
                result.port = port;
            }
        }

        if let Some(ingestion) = config_file.ingestion {
            if let Some(feed_url) = ingestion.feed_url {
                result.feed_url = feed_url;
            }
            if let Some(endpoint) = ingestion.sparql_endpoint {
                result.sparql_endpoint = endpoint;
            }
            if let Some(window_days) = ingestion.window_days {
                result.window_days = window_days;
            }
            if let Some(result_limit) = ingestion.result_limit {
                result.result_limit = result_limit;
            }
            if let Some(timeout) = ingestion.adapter_timeout_secs {
                result.adapter_timeout_secs = timeout;
            }
            if let Some(mode) = ingestion.persist_mode {
                result.persist_mode = mode;
            }
        }

        if let Some(logging) = config_file.logging {
            if let Some(level) = logging.level {
                result.log_level = Some(level);
            }
            if let Some(color) = logging.color {
                result.no_color = !color;
            }
        }

        Ok(result)
    }

    /// Apply CLI overrides to the configuration.
    ///
    /// This method merges command-line flags with the loaded configuration,
    /// giving precedence to CLI flags over environment variables.
    #[allow(clippy::too_many_arguments)]
    pub fn with_overrides(
        mut self,
        data_dir: Option<PathBuf>,
        config_file: Option<PathBuf>,
        host: Option<String>,
        port: Option<u16>,
        log_level: Option<String>,
        verbose: bool,
        no_color: bool,
    ) -> Self {
        if let Some(data_dir) = data_dir {
            self.data_dir = data_dir;
        }

        if let Some(config_file) = config_file {
            self.config_file = Some(config_file);
        }

        if let Some(host) = host {
            self.host = host;
        }

        if let Some(port) = port {
            self.port = port;
        }

        if let Some(log_level) = log_level {
            self.log_level = Some(log_level);
        }

        if verbose {
            self.verbose = true;
            // Verbose mode implies debug logging
            if self.log_level.is_none() {
                self.log_level = Some("debug".to_string());
            }
        }

        if no_color {
            self.no_color = true;
        }

        self
    }

    /// Path to the JSONL document file (the interoperable source of truth).
    pub fn items_path(&self) -> PathBuf {
        self.data_dir.join("items.jsonl")
    }

    /// Path to the binary snapshot (fast-path cache only).
    pub fn snapshot_path(&self) -> PathBuf {
        self.vectors_dir.join("documents.bin")
    }

    /// Ensure the data and vectors directories exist.
    pub fn ensure_dirs(&self) -> AppResult<()> {
        for dir in [&self.data_dir, &self.vectors_dir] {
            if !dir.exists() {
                std::fs::create_dir_all(dir).map_err(|e| {
                    AppError::Config(format!("Failed to create directory {:?}: {}", dir, e))
                })?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.port, 8000);
        assert_eq!(config.window_days, 365);
        assert_eq!(config.result_limit, 50);
        assert_eq!(config.persist_mode, PersistMode::Replace);
        assert!(!config.verbose);
    }

    #[test]
    fn test_items_path() {
        let config = AppConfig::default();
        assert!(config.items_path().ends_with("items.jsonl"));
        assert!(config.snapshot_path().ends_with("documents.bin"));
    }

    #[test]
    fn test_with_overrides() {
        let config = AppConfig::default();
        let overridden = config.with_overrides(
            Some(PathBuf::from("/tmp/radar")),
            None,
            Some("127.0.0.1".to_string()),
            Some(9000),
            None,
            true,
            false,
        );

        assert_eq!(overridden.data_dir, PathBuf::from("/tmp/radar"));
        assert_eq!(overridden.host, "127.0.0.1");
        assert_eq!(overridden.port, 9000);
        assert!(overridden.verbose);
        assert_eq!(overridden.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_persist_mode_from_str() {
        assert_eq!(
            "replace".parse::<PersistMode>().unwrap(),
            PersistMode::Replace
        );
        assert_eq!("Merge".parse::<PersistMode>().unwrap(), PersistMode::Merge);
        assert!("append".parse::<PersistMode>().is_err());
    }

    #[test]
    fn test_merge_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("radar.yaml");
        std::fs::write(
            &path,
            "server:\n  port: 9090\ningestion:\n  window_days: 30\n  persist_mode: merge\n",
        )
        .unwrap();

        let mut config = AppConfig::default();
        let merged = config.merge_yaml(&path).unwrap();
        assert_eq!(merged.port, 9090);
        assert_eq!(merged.window_days, 30);
        assert_eq!(merged.persist_mode, PersistMode::Merge);
    }
}
