//! Serve command handler.
//!
//! Runs the HTTP API server over the local document collection.

use clap::Args;
use radar_core::{config::AppConfig, AppResult};

/// Run the HTTP API server
#[derive(Args, Debug)]
pub struct ServeCommand {
    /// Bind host
    #[arg(long, env = "RADAR_HOST")]
    pub host: Option<String>,

    /// Bind port
    #[arg(short, long, env = "RADAR_PORT")]
    pub port: Option<u16>,
}

impl ServeCommand {
    pub async fn execute(&self, mut config: AppConfig) -> AppResult<()> {
        if let Some(host) = &self.host {
            config.host = host.clone();
        }
        if let Some(port) = self.port {
            config.port = port;
        }

        tracing::info!("Serving on {}:{}", config.host, config.port);
        radar_server::run_server(config).await
    }
}
