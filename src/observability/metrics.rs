//! Metrics collection and exposition.
//!
//! # Metrics
//! - `pages_rendered_total` (counter): rendered pages by leaf route, status
//! - `page_render_duration_seconds` (histogram): resolve + compose + serialize
//!
//! Without an installed recorder every call is a no-op.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its scrape endpoint.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_render(route: &str, status: u16, start: Instant) {
    metrics::counter!(
        "pages_rendered_total",
        "route" => route.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!("page_render_duration_seconds", "route" => route.to_string())
        .record(start.elapsed().as_secs_f64());
}
