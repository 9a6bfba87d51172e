//! Metrics collection and exposition.
//!
//! # Metrics
//! - `healthz_requests_total` (counter): `/healthz` answers by status
//! - `supervisor_probes_total` (counter): probe outcomes
//! - `supervisor_probe_latency_seconds` (histogram): probe latency
//! - `supervisor_failure_streak` (gauge): current consecutive failures
//! - `supervisor_healthy` (gauge): 1=healthy, 0=unhealthy
//!
//! Without an installed recorder every call is a no-op.

use std::net::SocketAddr;

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

use crate::health::{HealthStatus, ProbeResult};

/// Install the Prometheus recorder and its scrape endpoint on `addr`.
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_healthz(status: HealthStatus) {
    counter!("healthz_requests_total", "status" => status.as_str()).increment(1);
}

pub fn record_probe(result: &ProbeResult, failure_streak: u32, status: HealthStatus) {
    counter!("supervisor_probes_total", "outcome" => result.outcome.as_str()).increment(1);
    histogram!("supervisor_probe_latency_seconds").record(result.latency.as_secs_f64());
    gauge!("supervisor_failure_streak").set(failure_streak as f64);
    gauge!("supervisor_healthy").set(if status.is_healthy() { 1.0 } else { 0.0 });
}
