//! Interception matching.
//!
//! # Responsibilities
//! - Decide whether a request belongs to the proxy (path prefix)
//! - Hand back the request target the destination is decoded from
//!
//! # Design Decisions
//! - Path matching is case-sensitive
//! - Only the path is tested; the query never makes a request a candidate
//! - No regex, a plain prefix check

use axum::http::Uri;

/// Matches the request path prefix.
#[derive(Debug, Clone)]
pub struct PathPrefixMatcher {
    prefix: String,
}

impl PathPrefixMatcher {
    /// Create a new path prefix matcher.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Returns true if the request path starts with the prefix.
    pub fn matches(&self, uri: &Uri) -> bool {
        uri.path().starts_with(&self.prefix)
    }

    /// Path and query of a matching request, or `None` if it does not match.
    pub fn target<'a>(&self, uri: &'a Uri) -> Option<&'a str> {
        if !self.matches(uri) {
            return None;
        }
        uri.path_and_query().map(|pq| pq.as_str())
    }
}
