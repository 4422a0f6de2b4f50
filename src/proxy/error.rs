//! Error types for the CORS proxy.

use axum::http::StatusCode;
use std::error::Error as _;
use thiserror::Error;

use crate::proxy::path::DecodeError;
use crate::security::mime::InvalidMimePattern;

/// Errors raised while building the proxy. Fatal at startup.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("Invalid config for cors-proxy: {0}")]
    MimePattern(#[from] InvalidMimePattern),

    #[error("Failed to build upstream HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

/// Per-request failures. Every variant ends as an HTTP response; none
/// reaches the hosting server's own error handling.
#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("Only GET requests are allowed")]
    MethodNotAllowed,

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("Blocked by Proxy: {host} is not on Hosts whitelist")]
    HostBlocked { host: String },

    #[error("{0}")]
    Upstream(String),

    #[error("Status is {0}")]
    UpstreamStatus(u16),

    #[error("Proxied response does not contain {0}")]
    MissingHeader(&'static str),

    #[error("Proxied response has blocked content-type: {0}")]
    BlockedContentType(String),
}

impl ProxyError {
    /// HTTP status reported to the client.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::BlockedContentType(_) => StatusCode::NOT_ACCEPTABLE,
            Self::Decode(_)
            | Self::HostBlocked { .. }
            | Self::Upstream(_)
            | Self::UpstreamStatus(_)
            | Self::MissingHeader(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Short label used for metrics and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MethodNotAllowed => "method_not_allowed",
            Self::Decode(_) => "decode_error",
            Self::HostBlocked { .. } => "host_blocked",
            Self::BlockedContentType(_) => "type_blocked",
            Self::Upstream(_) => "upstream_error",
            Self::UpstreamStatus(_) | Self::MissingHeader(_) => "upstream_invalid",
        }
    }

    /// True for policy rejections (host or content type).
    pub fn is_policy_violation(&self) -> bool {
        matches!(self, Self::HostBlocked { .. } | Self::BlockedContentType(_))
    }
}

impl From<reqwest::Error> for ProxyError {
    fn from(e: reqwest::Error) -> Self {
        // Display stops at "error sending request"; append the causes.
        let mut message = e.to_string();
        let mut source = e.source();
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        Self::Upstream(message)
    }
}
