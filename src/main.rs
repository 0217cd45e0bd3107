//! Kong health checker.
//!
//! Periodically discovers every target behind every upstream of a Kong
//! load balancer, probes it over TCP or HTTP, and flips its weight between
//! 0 and 100 so that dead targets stop receiving traffic.
//!
//! # Architecture Overview
//!
//! ```text
//!   ┌──────────────┐  tick   ┌──────────────────┐  targets  ┌─────────────┐
//!   │  discovery   │───────▶│ bounded queue    │─────────▶│ worker pool │
//!   │  (interval)  │         │ (backpressure)   │           │  N probers  │
//!   └──────┬───────┘         └──────────────────┘           └──────┬──────┘
//!          │ list upstreams / targets                               │ set weight
//!          ▼                                                        ▼
//!   ┌─────────────────────────────────────────────────────────────────────┐
//!   │                         Kong admin API                              │
//!   └─────────────────────────────────────────────────────────────────────┘
//! ```

use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;

use kong_healthcheck::admin_api::KongClient;
use kong_healthcheck::cli::Cli;
use kong_healthcheck::lifecycle::{signals, Supervisor};
use kong_healthcheck::observability::{logging, metrics};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Cli::parse().into_config()?;

    logging::init(&config.observability);

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "kong-healthcheck starting");

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse::<SocketAddr>() {
            Ok(addr) => {
                if let Err(e) = metrics::init_metrics(addr) {
                    tracing::error!(error = %e, "Failed to start metrics exporter");
                }
            }
            Err(_) => {
                tracing::error!(
                    metrics_address = %config.observability.metrics_address,
                    "Failed to parse metrics address"
                );
            }
        }
    }

    let admin = Arc::new(KongClient::new(&config.admin)?);
    let kong = admin.base_url().to_string();
    let supervisor = Supervisor::start(&config, admin)?;

    tracing::info!(
        kong = %kong,
        interval_ms = config.health_check.interval_ms,
        "Started kong-healthcheck"
    );

    let signal = signals::wait_for_signal().await;
    tracing::info!(signal, "Stopping kong-healthcheck, received os signal");

    supervisor.stop().await;

    tracing::info!("Shutdown complete");
    Ok(())
}
