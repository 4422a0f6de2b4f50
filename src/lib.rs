//! Development-time CORS proxy.
//!
//! Lets a page served by the local dev server load remote images and videos
//! through a same-origin path:
//!
//! ```text
//! encode("https://example.com/photo.jpg")
//!     → /cors-proxy/https%3A%2F%2Fexample.com%2Fphoto.jpg
//! ```
//!
//! The proxy is an axum middleware ([`http::with_cors_proxy`]); the
//! [`DevServer`] puts it in front of a static file service.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod proxy;
pub mod routing;
pub mod security;

pub use config::ServerConfig;
pub use http::DevServer;
pub use lifecycle::Shutdown;
pub use proxy::{decode, encode, CorsProxy, PROXY_PREFIX};
