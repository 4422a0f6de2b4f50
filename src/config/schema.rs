//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the dev server.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration for the development server.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServerConfig {
    /// Listener configuration (bind address, static files).
    pub listener: ListenerConfig,

    /// CORS proxy policy.
    pub proxy: ProxySettings,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "127.0.0.1:9000").
    pub bind_address: String,

    /// Directory served for every request the proxy does not intercept.
    pub static_root: Option<PathBuf>,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:9000".to_string(),
            static_root: None,
        }
    }
}

/// Proxy policy and upstream client settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProxySettings {
    /// Allowed upstream content types, `type/subtype` with `*` allowed as subtype.
    /// Empty = allow every type.
    pub allowed_mime_types: Vec<String>,

    /// Allowed destination hosts (exact, case-insensitive).
    /// Empty = allow every host.
    pub white_list_hosts: Vec<String>,

    /// Maximum redirects followed for a single fetch.
    pub max_redirects: usize,

    /// Honor HTTP_PROXY / HTTPS_PROXY / NO_PROXY for upstream fetches.
    pub use_system_proxy: bool,

    /// User-Agent sent upstream.
    pub user_agent: String,
}

impl Default for ProxySettings {
    fn default() -> Self {
        Self {
            allowed_mime_types: vec!["image/*".to_string(), "video/*".to_string()],
            white_list_hosts: Vec::new(),
            max_redirects: 3,
            use_system_proxy: true,
            user_agent: concat!("cors-proxy/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Upstream connection establishment timeout in seconds.
    pub connect_secs: u64,

    /// Total upstream fetch timeout (connect, headers and body) in seconds.
    pub fetch_secs: u64,

    /// Request timeout for anything served by the dev server, in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_secs: 5,
            fetch_secs: 10,
            request_secs: 30,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` takes precedence.
    pub log_level: String,

    /// Log output format ("pretty" or "json").
    pub log_format: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: "pretty".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9464".to_string(),
        }
    }
}
