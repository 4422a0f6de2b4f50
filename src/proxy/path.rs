//! Proxied path encoding and destination decoding.
//!
//! # Format
//! ```text
//! /cors-proxy/<percent-encoded absolute URL>
//!
//! https://example.com/photo.jpg
//!     → /cors-proxy/https%3A%2F%2Fexample.com%2Fphoto.jpg
//! ```
//!
//! # Design Decisions
//! - Encoding never validates; the decoder is the only gate
//! - Only `http` and `https` destinations decode successfully, so `file:`
//!   and other local schemes never reach the upstream client

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use thiserror::Error;
use url::Url;

/// Path prefix that marks a request as a proxy request.
pub const PROXY_PREFIX: &str = "/cors-proxy/";

/// Characters left literal when embedding a destination in a path segment.
/// Everything else, including `/`, `:`, `?` and `&`, is escaped.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// A proxied destination could not be turned into an `http`/`https` URL.
///
/// `host` carries whatever host could still be read from the rejected
/// destination; the middleware reports host allow-list violations before the
/// decode failure itself.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct DecodeError {
    message: String,
    host: Option<String>,
}

impl DecodeError {
    fn new(message: impl Into<String>, host: Option<String>) -> Self {
        Self {
            message: message.into(),
            host,
        }
    }

    /// Human-readable reason.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Host of the rejected destination, if one could be parsed.
    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }
}

/// Build the local proxy path for a remote resource.
pub fn encode(destination: &str) -> String {
    format!(
        "{}{}",
        PROXY_PREFIX,
        utf8_percent_encode(destination, COMPONENT)
    )
}

/// Recover the destination URL from a proxied request target.
///
/// `target` is the request path (and query, if any). A missing prefix is
/// tolerated so callers may pass the already-stripped remainder.
pub fn decode(target: &str) -> Result<Url, DecodeError> {
    let encoded = target.strip_prefix(PROXY_PREFIX).unwrap_or(target);

    let decoded = percent_decode_str(encoded).decode_utf8().map_err(|_| {
        DecodeError::new(
            "Destination is not valid UTF-8 after percent-decoding",
            None,
        )
    })?;

    let url = Url::parse(&decoded).map_err(|e| {
        DecodeError::new(format!("Invalid destination URL '{}': {}", decoded, e), None)
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        _ => Err(DecodeError::new(
            "Only supported protocols are http and https",
            url.host_str().map(str::to_string),
        )),
    }
}
