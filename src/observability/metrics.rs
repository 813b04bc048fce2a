//! Metrics collection and exposition.
//!
//! # Metrics
//! - `watcher_lines_total` (counter): complete lines read from the log
//! - `watcher_lines_skipped_total` (counter): lines without pool/status fields
//! - `watcher_alerts_total` (counter): alerts raised, by `kind`
//! - `watcher_alert_deliveries_total` (counter): delivery attempts, by `outcome`
//! - `watcher_error_rate_percent` (gauge): error rate over the last full window
//!
//! # Design Decisions
//! - Recording is a no-op until a recorder is installed
//! - The Prometheus endpoint is opt-in (`observability.metrics_enabled`)

use std::net::SocketAddr;

use metrics::{counter, gauge};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its HTTP listener.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_line() {
    counter!("watcher_lines_total").increment(1);
}

pub fn record_skipped_line() {
    counter!("watcher_lines_skipped_total").increment(1);
}

pub fn record_alert(kind: &'static str) {
    counter!("watcher_alerts_total", "kind" => kind).increment(1);
}

pub fn record_delivery(outcome: &'static str) {
    counter!("watcher_alert_deliveries_total", "outcome" => outcome).increment(1);
}

pub fn record_error_rate(rate: f64) {
    gauge!("watcher_error_rate_percent").set(rate);
}
