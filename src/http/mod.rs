//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, tracing, request ID, timeout)
//!     → middleware/cors_proxy.rs (intercept /cors-proxy/ or pass through)
//!         → proxy pipeline → response.rs (relay or error)
//!         → next → static files / 404
//!     → Send to client
//! ```

pub mod middleware;
pub mod request;
pub mod response;
pub mod server;

pub use middleware::with_cors_proxy;
pub use request::{RequestIdGenerator, X_REQUEST_ID};
pub use response::X_PROXY_TARGET;
pub use server::DevServer;
