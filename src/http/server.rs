//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router: static files (or 404) behind the CORS proxy
//! - Wire up middleware (tracing, request ID, timeout)
//! - Bind server to listener
//! - Drain on shutdown

use axum::{
    http::{StatusCode, Uri},
    response::IntoResponse,
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    services::ServeDir,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ServerConfig;
use crate::http::middleware::with_cors_proxy;
use crate::http::request::RequestIdGenerator;
use crate::proxy::{CorsProxy, SetupError};

/// Local development server with the CORS proxy on its middleware chain.
pub struct DevServer {
    router: Router,
}

impl DevServer {
    /// Create a new server. Fails if the proxy configuration is invalid.
    pub fn new(config: ServerConfig) -> Result<Self, SetupError> {
        let proxy = Arc::new(CorsProxy::new(&config.proxy, &config.timeouts)?);
        let router = Self::build_router(&config, proxy);
        Ok(Self { router })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ServerConfig, proxy: Arc<CorsProxy>) -> Router {
        let app = match &config.listener.static_root {
            Some(root) => {
                tracing::info!(root = %root.display(), "Serving static files");
                Router::new().fallback_service(ServeDir::new(root))
            }
            None => Router::new().fallback(not_found),
        };

        with_cors_proxy(app, proxy)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(RequestIdGenerator))
            .layer(TraceLayer::new_for_http())
    }

    /// Router with every layer applied, for embedding or in-process tests.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

async fn not_found(uri: Uri) -> impl IntoResponse {
    (StatusCode::NOT_FOUND, format!("No static file for {}", uri.path()))
}
