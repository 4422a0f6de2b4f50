//! Local development server with a CORS proxy.
//!
//! # Architecture Overview
//!
//! ```text
//!   Browser                       DEV SERVER                              Remote host
//!   ───────                       ──────────                              ───────────
//!   GET /cors-proxy/<url> ──▶ trace → request id → timeout
//!                                   │
//!                                   ▼
//!                             cors_proxy middleware
//!                              │                │
//!                   prefix match                 no match
//!                              │                │
//!              decode → host check          static files / 404
//!                              │
//!                              ▼
//!                         upstream GET ──────────────────────────────▶ resource
//!                              │  ◀────────────────────────────────────
//!                  status/header/type checks
//!                              │
//!   ◀──────────── relay (200 + X-Proxy-Target) or error (400/405/406)
//! ```

use clap::Parser;
use std::path::PathBuf;
use tokio::net::TcpListener;

use cors_proxy::config::{read_config, validate_config, ConfigError, ServerConfig};
use cors_proxy::http::DevServer;
use cors_proxy::lifecycle::{signals, Shutdown};
use cors_proxy::observability::{logging, metrics};

#[derive(Parser, Debug)]
#[command(name = "cors-proxy")]
#[command(about = "Local dev server that proxies remote media under /cors-proxy/", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Bind address, overrides listener.bind_address.
    #[arg(short, long)]
    bind: Option<String>,

    /// Static directory to serve, overrides listener.static_root.
    #[arg(short, long)]
    root: Option<PathBuf>,

    /// Allowed destination host (repeatable), replaces proxy.white_list_hosts.
    #[arg(long = "allow-host")]
    allow_hosts: Vec<String>,

    /// Allowed MIME pattern (repeatable), replaces proxy.allowed_mime_types.
    #[arg(long = "allow-mime")]
    allow_mimes: Vec<String>,
}

impl Cli {
    /// File (or defaults), then flag overrides, then one validation pass.
    fn resolve_config(&self) -> Result<ServerConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => read_config(path)?,
            None => ServerConfig::default(),
        };

        if let Some(bind) = &self.bind {
            config.listener.bind_address = bind.clone();
        }
        if let Some(root) = &self.root {
            config.listener.static_root = Some(root.clone());
        }
        if !self.allow_hosts.is_empty() {
            config.proxy.white_list_hosts = self.allow_hosts.clone();
        }
        if !self.allow_mimes.is_empty() {
            config.proxy.allowed_mime_types = self.allow_mimes.clone();
        }

        validate_config(&config).map_err(ConfigError::Validation)?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = cli.resolve_config()?;

    logging::init_logging(&config.observability)?;

    tracing::info!("cors-proxy v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        static_root = ?config.listener.static_root,
        fetch_timeout_secs = config.timeouts.fetch_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        let addr = config.observability.metrics_address.parse()?;
        if let Err(e) = metrics::init_metrics(addr) {
            tracing::error!(error = %e, "Failed to start metrics exporter");
        }
    }

    let server = DevServer::new(config.clone())?;

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;
    tracing::info!("Proxy available under http://{}/cors-proxy/", local_addr);

    let shutdown = Shutdown::new();
    signals::spawn_signal_handler(shutdown.clone());

    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
