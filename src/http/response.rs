//! Response writing for the proxy.
//!
//! # Responsibilities
//! - Relay a validated upstream response (content-type, content-length, body)
//! - Add `X-Proxy-Target` naming the upstream that served the bytes
//! - Write failures as status + plain-text reason
//!
//! # Design Decisions
//! - The reason is also put on the HTTP/1 status line (`hyper::ext::ReasonPhrase`)
//! - Control characters in reasons are replaced so the status line stays valid
//! - Successful relays always answer 200, whatever 2xx the upstream used

use axum::{
    body::Body,
    http::{header, HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use hyper::ext::ReasonPhrase;
use url::Url;

use crate::proxy::{ProxyError, Relay};

/// Diagnostic header naming the resolved destination.
pub const X_PROXY_TARGET: HeaderName = HeaderName::from_static("x-proxy-target");

/// Write a validated upstream response back to the client.
pub fn relay_response(destination: &Url, relay: Relay) -> Response {
    let mut response = Response::new(Body::from(relay.body));
    let headers = response.headers_mut();
    headers.insert(header::CONTENT_TYPE, relay.content_type);
    headers.insert(header::CONTENT_LENGTH, relay.content_length);
    if let Ok(target) = HeaderValue::from_str(destination.as_str()) {
        headers.insert(X_PROXY_TARGET, target);
    }
    response
}

/// Write a failure: `status` plus a human-readable reason.
pub fn error_response(status: StatusCode, message: &str) -> Response {
    let mut response = (status, message.to_string()).into_response();
    if let Some(reason) = reason_phrase(message) {
        response.extensions_mut().insert(reason);
    }
    response
}

fn reason_phrase(message: &str) -> Option<ReasonPhrase> {
    let sanitized: String = message
        .chars()
        .map(|c| if c.is_control() && c != '\t' { ' ' } else { c })
        .collect();
    ReasonPhrase::try_from(sanitized).ok()
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        error_response(self.status_code(), &self.to_string())
    }
}
