//! CORS proxy middleware.
//!
//! Intercepts `/cors-proxy/` requests on the hosting router and answers them
//! from the upstream; everything else goes to `next` untouched.

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::{from_fn_with_state, Next},
    response::Response,
    Router,
};
use std::sync::Arc;
use std::time::Instant;

use crate::http::request::request_id;
use crate::http::response::{error_response, relay_response};
use crate::observability::metrics;
use crate::proxy::{CorsProxy, ProxyError};

/// Attach the proxy to a router. Works for any router state.
pub fn with_cors_proxy<S>(router: Router<S>, proxy: Arc<CorsProxy>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.layer(from_fn_with_state(proxy, cors_proxy_middleware))
}

pub async fn cors_proxy_middleware(
    State(proxy): State<Arc<CorsProxy>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let Some(target) = proxy.matcher().target(request.uri()).map(str::to_owned) else {
        return next.run(request).await;
    };

    let start_time = Instant::now();
    let request_id = request_id(&request).to_string();
    let method = request.method().clone();

    tracing::debug!(
        request_id = %request_id,
        method = %method,
        target = %target,
        "Intercepted proxy request"
    );

    match proxy.handle(&method, &target).await {
        Ok((destination, relay)) => {
            tracing::info!(
                request_id = %request_id,
                destination = %destination,
                content_type = ?relay.content_type,
                bytes = relay.body.len(),
                "Relayed proxied resource"
            );
            metrics::record_proxy_request("relayed", 200, start_time);
            relay_response(&destination, relay)
        }
        Err(e) => {
            let status = e.status_code();
            if e.is_policy_violation() {
                tracing::warn!(request_id = %request_id, target = %target, reason = %e, "Blocked by proxy policy");
            } else if matches!(e, ProxyError::Upstream(_)) {
                tracing::error!(request_id = %request_id, target = %target, error = %e, "Upstream error");
            } else {
                tracing::warn!(request_id = %request_id, target = %target, status = %status, reason = %e, "Rejected proxy request");
            }
            metrics::record_proxy_request(e.kind(), status.as_u16(), start_time);
            error_response(status, &e.to_string())
        }
    }
}
