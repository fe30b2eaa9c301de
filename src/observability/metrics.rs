//! Metrics collection and exposition.
//!
//! # Metrics
//! - `static_host_requests_total` (counter): requests by method, status, mount
//! - `static_host_request_duration_seconds` (histogram): latency distribution
//!
//! # Design Decisions
//! - Prometheus exporter runs on its own listener, separate from traffic
//! - Label cardinality stays bounded: mount names come from config, not
//!   from request paths

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter on its scrape address.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(err) => tracing::error!(error = %err, "Failed to install metrics exporter"),
    }
}

/// Record one finished request.
pub fn record_request(method: &str, status: u16, mount: &str, start_time: Instant) {
    let labels = [
        ("method", method.to_string()),
        ("status", status.to_string()),
        ("mount", mount.to_string()),
    ];
    metrics::counter!("static_host_requests_total", &labels).increment(1);
    metrics::histogram!("static_host_request_duration_seconds", &labels)
        .record(start_time.elapsed().as_secs_f64());
}
