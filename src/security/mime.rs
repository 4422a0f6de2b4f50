//! Content-type allow-list.
//!
//! # Responsibilities
//! - Parse `type/subtype` patterns once at startup (subtype may be `*`)
//! - Match upstream `content-type` values against the patterns
//!
//! # Design Decisions
//! - Empty list = every type allowed
//! - Anything that is not a clean `type/subtype` pair fails closed
//! - Parameters are part of the subtype (`image/png; charset=x` is not `image/png`)
//! - Comparison is trimmed and case-insensitive on both segments

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A MIME pattern did not have the shape `type/subtype`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid MIME pattern '{pattern}': entries must have the format 'leftPart/rightPart' where rightPart may be '*'")]
pub struct InvalidMimePattern {
    pub pattern: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Subtype {
    Any,
    Exact(String),
}

/// A single `type/subtype` allow-list entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MimePattern {
    kind: String,
    subtype: Subtype,
}

impl MimePattern {
    fn covers(&self, kind: &str, subtype: &str) -> bool {
        self.kind == kind
            && match &self.subtype {
                Subtype::Any => true,
                Subtype::Exact(s) => s == subtype,
            }
    }
}

impl FromStr for MimePattern {
    type Err = InvalidMimePattern;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, subtype) = split_pair(s).ok_or_else(|| InvalidMimePattern {
            pattern: s.to_string(),
        })?;

        let subtype = if subtype == "*" {
            Subtype::Any
        } else {
            Subtype::Exact(subtype)
        };

        Ok(Self { kind, subtype })
    }
}

impl fmt::Display for MimePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.subtype {
            Subtype::Any => write!(f, "{}/*", self.kind),
            Subtype::Exact(s) => write!(f, "{}/{}", self.kind, s),
        }
    }
}

/// Split into exactly two non-empty, trimmed, lower-cased segments.
fn split_pair(value: &str) -> Option<(String, String)> {
    let mut parts = value.split('/');
    let left = parts.next()?.trim().to_lowercase();
    let right = parts.next()?.trim().to_lowercase();
    if parts.next().is_some() || left.is_empty() || right.is_empty() {
        return None;
    }
    Some((left, right))
}

/// Allowed upstream content types.
#[derive(Debug, Clone, Default)]
pub struct MimeAllowList {
    patterns: Vec<MimePattern>,
}

impl MimeAllowList {
    /// Parse every pattern; the first malformed one aborts construction.
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self, InvalidMimePattern> {
        let patterns = patterns
            .iter()
            .map(|p| p.as_ref().parse())
            .collect::<Result<Vec<MimePattern>, _>>()?;
        Ok(Self { patterns })
    }

    pub fn patterns(&self) -> &[MimePattern] {
        &self.patterns
    }

    /// Returns true if `content_type` is allowed.
    pub fn matches(&self, content_type: &str) -> bool {
        if self.patterns.is_empty() {
            return true;
        }

        let Some((kind, subtype)) = split_pair(content_type) else {
            return false;
        };

        self.patterns.iter().any(|p| p.covers(&kind, &subtype))
    }
}
