//! Metrics collection and exposition.
//!
//! # Metrics
//! - `cors_proxy_requests_total` (counter): intercepted requests by outcome, status
//! - `cors_proxy_request_duration_seconds` (histogram): time to relay or reject

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};
use std::net::SocketAddr;
use std::time::Instant;

/// Install the Prometheus recorder and its HTTP listener.
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;

    metrics::describe_counter!(
        "cors_proxy_requests_total",
        "Intercepted proxy requests by outcome and status"
    );
    metrics::describe_histogram!(
        "cors_proxy_request_duration_seconds",
        metrics::Unit::Seconds,
        "Time spent handling an intercepted proxy request"
    );

    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record one intercepted request.
pub fn record_proxy_request(outcome: &'static str, status: u16, start: Instant) {
    metrics::counter!(
        "cors_proxy_requests_total",
        "outcome" => outcome,
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!("cors_proxy_request_duration_seconds", "outcome" => outcome)
        .record(start.elapsed().as_secs_f64());
}
