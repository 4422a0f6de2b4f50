//! CORS proxy pipeline.
//!
//! # Data Flow
//! ```text
//! GET /cors-proxy/<encoded URL>
//!     → method gate (GET only)
//!     → path.rs (strip prefix, percent-decode, parse, scheme check)
//!     → host allow-list
//!     → upstream.rs (fetch, ≤ N redirects, timeouts)
//!     → upstream.rs (status, content-type, content-length, type policy)
//!     → Relay or ProxyError
//! ```
//!
//! # Design Decisions
//! - `CorsProxy` is built once and shared read-only; no per-request state survives
//! - Every failure is a `ProxyError`; the HTTP mapping lives in the middleware
//! - The host check runs before a decode failure is reported (see `resolve_destination`)

pub mod error;
pub mod path;
pub mod upstream;

pub use error::{ProxyError, SetupError};
pub use path::{decode, encode, DecodeError, PROXY_PREFIX};
pub use upstream::{Relay, UpstreamClient, UpstreamResponse};

use axum::http::Method;
use url::Url;

use crate::config::{ProxySettings, TimeoutConfig};
use crate::routing::PathPrefixMatcher;
use crate::security::{HostAllowList, MimeAllowList};

/// Host reported in a host block when the destination has none.
const UNKNOWN_HOST: &str = "unknown host";

/// Resolved, immutable proxy state.
#[derive(Debug)]
pub struct CorsProxy {
    matcher: PathPrefixMatcher,
    hosts: HostAllowList,
    mime: MimeAllowList,
    upstream: UpstreamClient,
}

impl CorsProxy {
    /// Build the proxy. Malformed MIME patterns are rejected here, before any
    /// request is handled.
    pub fn new(settings: &ProxySettings, timeouts: &TimeoutConfig) -> Result<Self, SetupError> {
        let mime = MimeAllowList::new(&settings.allowed_mime_types)?;
        let hosts = HostAllowList::new(&settings.white_list_hosts);
        let upstream = UpstreamClient::new(settings, timeouts).map_err(SetupError::Client)?;

        let allowed_mime_types: Vec<String> =
            mime.patterns().iter().map(ToString::to_string).collect();
        tracing::info!(
            prefix = PROXY_PREFIX,
            allowed_mime_types = ?allowed_mime_types,
            white_list_hosts = ?settings.white_list_hosts,
            max_redirects = settings.max_redirects,
            fetch_timeout_secs = timeouts.fetch_secs,
            "CORS proxy configured"
        );

        Ok(Self {
            matcher: PathPrefixMatcher::new(PROXY_PREFIX),
            hosts,
            mime,
            upstream,
        })
    }

    pub fn matcher(&self) -> &PathPrefixMatcher {
        &self.matcher
    }

    /// Decode the destination and apply the host allow-list.
    ///
    /// With a non-empty allow-list, a destination that fails to decode is
    /// reported as a host block (using whatever host it carries, or
    /// `unknown host`). Decode errors are only surfaced once the host check
    /// has passed. Either way nothing is fetched.
    pub fn resolve_destination(&self, target: &str) -> Result<Url, ProxyError> {
        let decoded = decode(target);

        if !self.hosts.is_unrestricted() {
            let host = match &decoded {
                Ok(url) => url.host_str(),
                Err(e) => e.host(),
            };
            if !host.is_some_and(|h| self.hosts.allows(h)) {
                return Err(ProxyError::HostBlocked {
                    host: host.unwrap_or(UNKNOWN_HOST).to_string(),
                });
            }
        }

        Ok(decoded?)
    }

    /// Fetch a resolved destination and validate the response.
    pub async fn forward(&self, destination: &Url) -> Result<Relay, ProxyError> {
        let response = self.upstream.fetch(destination).await?;
        response.into_relay(&self.mime)
    }

    /// Run the full pipeline for an intercepted request.
    pub async fn handle(&self, method: &Method, target: &str) -> Result<(Url, Relay), ProxyError> {
        if method != Method::GET {
            return Err(ProxyError::MethodNotAllowed);
        }

        let destination = self.resolve_destination(target)?;
        let relay = self.forward(&destination).await?;
        Ok((destination, relay))
    }
}
