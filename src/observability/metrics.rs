//! Metrics collection and exposition.
//!
//! # Metrics
//! - `subwatch_failures_reported_total` (counter): transport failures seen
//! - `subwatch_messages_processed_total` (counter): settled messages
//! - `subwatch_liveness_checks_total` (counter, by verdict): probe calls
//! - `subwatch_connection_alive` (gauge): last verdict, 1=alive
//!
//! # Design Decisions
//! - Recorders live in the consumer and the HTTP handlers; the monitor core
//!   stays free of observability calls

use std::net::SocketAddr;

use metrics::{counter, gauge};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter on its own listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "failed to install metrics exporter"),
    }
}

pub fn record_failure_reported() {
    counter!("subwatch_failures_reported_total").increment(1);
}

pub fn record_message_processed() {
    counter!("subwatch_messages_processed_total").increment(1);
}

pub fn record_liveness_check(alive: bool) {
    let verdict = if alive { "healthy" } else { "degraded" };
    counter!("subwatch_liveness_checks_total", "verdict" => verdict).increment(1);
    gauge!("subwatch_connection_alive").set(if alive { 1.0 } else { 0.0 });
}
