//! Upstream fetch and response validation.
//!
//! # Responsibilities
//! - Issue exactly one GET per proxied request (no retries)
//! - Follow a bounded number of redirects
//! - Enforce connect and total fetch timeouts
//! - Check status, required headers and content type before relay
//!
//! # Design Decisions
//! - Body is opaque bytes, buffered fully (content-length must be known upfront)
//! - Non-success bodies are never read
//! - Headers are copied verbatim, never re-derived from the body

use axum::body::Bytes;
use axum::http::{header, HeaderValue, StatusCode};
use reqwest::redirect::Policy;
use std::time::Duration;
use url::Url;

use crate::config::{ProxySettings, TimeoutConfig};
use crate::proxy::error::ProxyError;
use crate::security::mime::MimeAllowList;

/// HTTP client used for all upstream fetches.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    client: reqwest::Client,
}

impl UpstreamClient {
    pub fn new(settings: &ProxySettings, timeouts: &TimeoutConfig) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder()
            .redirect(Policy::limited(settings.max_redirects))
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .timeout(Duration::from_secs(timeouts.fetch_secs))
            .user_agent(settings.user_agent.as_str());

        if !settings.use_system_proxy {
            builder = builder.no_proxy();
        }

        Ok(Self {
            client: builder.build()?,
        })
    }

    /// Fetch `url`. Transport failures (DNS, refused, TLS, timeout, too
    /// many redirects) surface as `reqwest::Error`.
    pub async fn fetch(&self, url: &Url) -> Result<UpstreamResponse, reqwest::Error> {
        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        let content_type = response.headers().get(header::CONTENT_TYPE).cloned();
        let content_length = response.headers().get(header::CONTENT_LENGTH).cloned();

        let body = if status.as_u16() < 300 {
            response.bytes().await?
        } else {
            Bytes::new()
        };

        Ok(UpstreamResponse {
            status,
            content_type,
            content_length,
            body,
        })
    }
}

/// What the upstream returned, before validation.
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub content_type: Option<HeaderValue>,
    pub content_length: Option<HeaderValue>,
    pub body: Bytes,
}

/// A validated upstream response, ready to be written to the client.
#[derive(Debug, Clone)]
pub struct Relay {
    pub content_type: HeaderValue,
    pub content_length: HeaderValue,
    pub body: Bytes,
}

impl UpstreamResponse {
    /// Validate in order: status, content-type, content-length, type policy.
    pub fn into_relay(self, allowed: &MimeAllowList) -> Result<Relay, ProxyError> {
        if self.status.as_u16() >= 300 {
            return Err(ProxyError::UpstreamStatus(self.status.as_u16()));
        }

        let content_type = self
            .content_type
            .ok_or(ProxyError::MissingHeader("content-type"))?;
        let content_length = self
            .content_length
            .ok_or(ProxyError::MissingHeader("content-length"))?;

        let type_str = String::from_utf8_lossy(content_type.as_bytes());
        if !allowed.matches(&type_str) {
            return Err(ProxyError::BlockedContentType(type_str.into_owned()));
        }

        Ok(Relay {
            content_type,
            content_length,
            body: self.body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, content_type: Option<&'static str>, content_length: Option<&'static str>) -> UpstreamResponse {
        UpstreamResponse {
            status: StatusCode::from_u16(status).unwrap(),
            content_type: content_type.map(HeaderValue::from_static),
            content_length: content_length.map(HeaderValue::from_static),
            body: Bytes::from_static(b"data"),
        }
    }

    fn images() -> MimeAllowList {
        MimeAllowList::new(&["image/*"]).unwrap()
    }

    #[test]
    fn test_valid_response_relays() {
        let relay = response(200, Some("image/jpeg"), Some("4"))
            .into_relay(&images())
            .unwrap();
        assert_eq!(relay.content_type, "image/jpeg");
        assert_eq!(relay.content_length, "4");
        assert_eq!(&relay.body[..], b"data");
    }

    #[test]
    fn test_status_checked_first() {
        let err = response(404, None, None).into_relay(&images()).unwrap_err();
        assert!(matches!(err, ProxyError::UpstreamStatus(404)));

        let err = response(304, Some("image/png"), Some("4")).into_relay(&images()).unwrap_err();
        assert!(matches!(err, ProxyError::UpstreamStatus(304)));
    }

    #[test]
    fn test_missing_headers() {
        let err = response(200, None, Some("4")).into_relay(&images()).unwrap_err();
        assert_eq!(err.to_string(), "Proxied response does not contain content-type");

        let err = response(200, Some("image/png"), None).into_relay(&images()).unwrap_err();
        assert_eq!(err.to_string(), "Proxied response does not contain content-length");
    }

    #[test]
    fn test_content_type_checked_after_headers() {
        let err = response(200, Some("application/pdf"), None).into_relay(&images()).unwrap_err();
        assert!(matches!(err, ProxyError::MissingHeader("content-length")));

        let err = response(200, Some("application/pdf"), Some("4")).into_relay(&images()).unwrap_err();
        assert!(matches!(err, ProxyError::BlockedContentType(ref t) if t == "application/pdf"));
        assert_eq!(err.status_code(), StatusCode::NOT_ACCEPTABLE);
    }

    #[test]
    fn test_unrestricted_types() {
        let relay = response(200, Some("text/html; charset=utf-8"), Some("4"))
            .into_relay(&MimeAllowList::default())
            .unwrap();
        assert_eq!(relay.content_type, "text/html; charset=utf-8");
    }
}
