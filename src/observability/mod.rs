//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Proxy pipeline and server layers produce:
//!     → logging.rs (structured log events, request ID on every proxy event)
//!     → metrics.rs (request counters and latency histogram)
//!
//! Consumers:
//!     → stdout (pretty or JSON)
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```
//!
//! # Design Decisions
//! - `RUST_LOG` overrides the configured level
//! - Metrics calls are no-ops until a recorder is installed

pub mod logging;
pub mod metrics;
