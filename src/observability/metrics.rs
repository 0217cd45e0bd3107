//! Metrics collection and exposition.
//!
//! # Responsibilities
//! - Define health checker metrics (ticks, probes, weight writes)
//! - Expose a Prometheus-compatible metrics endpoint
//!
//! # Metrics
//! - `healthcheck_discovery_ticks_total` (counter)
//! - `healthcheck_discovery_skipped_total` (counter): ticks skipped while a pass is in flight
//! - `healthcheck_discovery_failures_total` (counter): by scope (upstreams, targets)
//! - `healthcheck_targets_enqueued_total` (counter)
//! - `healthcheck_probes_total` (counter): by type, result (up, down)
//! - `healthcheck_weight_updates_total` (counter): by state, result (ok, error)
//!
//! Recording is a no-op until `init_metrics` installs the exporter.

use std::net::SocketAddr;

use metrics::counter;
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus exporter listening on `addr`.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

pub fn record_discovery_tick() {
    counter!("healthcheck_discovery_ticks_total").increment(1);
}

pub fn record_discovery_skipped() {
    counter!("healthcheck_discovery_skipped_total").increment(1);
}

/// `scope` is `"upstreams"` or `"targets"`.
pub fn record_discovery_failure(scope: &'static str) {
    counter!("healthcheck_discovery_failures_total", "scope" => scope).increment(1);
}

pub fn record_target_enqueued() {
    counter!("healthcheck_targets_enqueued_total").increment(1);
}

pub fn record_probe(check_type: &'static str, reachable: bool) {
    let result = if reachable { "up" } else { "down" };
    counter!("healthcheck_probes_total", "type" => check_type, "result" => result).increment(1);
}

pub fn record_weight_update(state: &'static str, ok: bool) {
    let result = if ok { "ok" } else { "error" };
    counter!("healthcheck_weight_updates_total", "state" => state, "result" => result).increment(1);
}
