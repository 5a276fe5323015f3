//! Metrics collection and exposition.
//!
//! # Metrics
//! - `monitor_captures_total` (counter): recorded interactions by route
//! - `monitor_ignored_requests_total` (counter): unrecorded requests by reason
//! - `monitor_evictions_total` (counter): entries dropped by the retention bound
//! - `monitor_clears_total` (counter): explicit clears of the log
//! - `monitor_log_entries` (gauge): entries currently retained
//!
//! Without an installed recorder every call here is a no-op.

use std::net::SocketAddr;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its scrape listener on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_capture(route: &'static str) {
    metrics::counter!("monitor_captures_total", "route" => route).increment(1);
}

pub fn record_ignored(reason: &'static str) {
    metrics::counter!("monitor_ignored_requests_total", "reason" => reason).increment(1);
}

pub fn record_evictions(count: usize) {
    metrics::counter!("monitor_evictions_total").increment(count as u64);
}

pub fn record_clear() {
    metrics::counter!("monitor_clears_total").increment(1);
}

pub fn record_log_entries(len: usize) {
    metrics::gauge!("monitor_log_entries").set(len as f64);
}
