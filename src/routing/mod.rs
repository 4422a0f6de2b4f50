//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (path)
//!     → matcher.rs (prefix test)
//!     → Match: proxy pipeline
//!     → NoMatch: next handler in the chain
//! ```
//!
//! # Design Decisions
//! - A single decision point, fixed at startup
//! - Deterministic: same path always takes the same branch

pub mod matcher;

pub use matcher::PathPrefixMatcher;
