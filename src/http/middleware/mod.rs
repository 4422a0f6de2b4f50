//! Middleware attached to the dev server's chain.

pub mod cors_proxy;

pub use cors_proxy::{cors_proxy_middleware, with_cors_proxy};
