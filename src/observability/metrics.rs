//! Metrics collection and exposition.
//!
//! # Metrics
//! - `ctxlog_lines_total` (counter): lines written by a sink, by level
//! - `ctxlog_write_failures_total` (counter): lines a sink failed to write, by level
//! - `ctxlog_level_changes_total` (counter): successful runtime level changes
//! - `ctxlog_registered_loggers` (gauge): loggers in the registry

use std::net::SocketAddr;

use metrics_exporter_prometheus::PrometheusBuilder;

use crate::logger::Level;

/// Install the Prometheus recorder and its HTTP listener on `addr`.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics recorder"),
    }
}

pub fn record_line(level: Level) {
    ::metrics::counter!("ctxlog_lines_total", "level" => level.as_str()).increment(1);
}

pub fn record_write_failure(level: Level) {
    ::metrics::counter!("ctxlog_write_failures_total", "level" => level.as_str()).increment(1);
}

pub fn record_level_change() {
    ::metrics::counter!("ctxlog_level_changes_total").increment(1);
}

pub fn record_registered(count: usize) {
    ::metrics::gauge!("ctxlog_registered_loggers").set(count as f64);
}
