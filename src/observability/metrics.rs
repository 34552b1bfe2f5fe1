//! Metrics collection and exposition.
//!
//! # Metrics
//! - `proxy_requests_total` (counter): requests by operation, status
//! - `proxy_request_duration_seconds` (histogram): latency by operation
//! - `proxy_session_handshakes_total` (counter): handshake outcomes
//!
//! # Design Decisions
//! - Metric updates are cheap (atomic operations via the metrics facade)
//! - The Prometheus endpoint is optional and lives on its own address

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter on `addr`. Failure to install is
/// logged and otherwise ignored; the proxy works without metrics.
pub fn init_metrics(addr: SocketAddr) {
    if let Err(e) = PrometheusBuilder::new().with_http_listener(addr).install() {
        tracing::error!(error = %e, "Failed to install Prometheus exporter");
    } else {
        tracing::info!(address = %addr, "Metrics endpoint ready");
    }
}

/// Record one completed inbound request.
pub fn record_request(operation: &'static str, status: u16, start: Instant) {
    metrics::counter!(
        "proxy_requests_total",
        "operation" => operation,
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!(
        "proxy_request_duration_seconds",
        "operation" => operation
    )
    .record(start.elapsed().as_secs_f64());
}

/// Record the outcome of one session acquisition run.
pub fn record_handshake(outcome: &'static str) {
    metrics::counter!(
        "proxy_session_handshakes_total",
        "outcome" => outcome
    )
    .increment(1);
}
