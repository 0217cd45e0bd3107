//! Periodic target discovery.
//!
//! # Data Flow
//! ```text
//! interval tick
//!     → AdminApi::list_upstreams()            (failure: skip this tick)
//!     → one task per upstream:
//!         AdminApi::list_targets(upstream)    (failure: skip this upstream)
//!         → queue.send(target)                (waits while the queue is full)
//! ```
//!
//! # Design Decisions
//! - Upstreams and targets are fetched fresh every tick, never cached
//! - Fetch tasks are tracked in a `JoinSet` so stop can wait for them
//! - A tick is skipped while the previous pass still has fetches in
//!   flight, so a slow pool throttles discovery instead of piling up
//!   stale target lists
//! - The loop owns the queue sender; returning from `run` closes the
//!   queue once the last fetch task has finished

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinSet;
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::admin_api::{AdminApi, Target, Upstream};
use crate::config::HealthCheckConfig;
use crate::observability::metrics;

/// Errors raised while constructing the discovery loop.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DiscoveryError {
    #[error("health check interval must be a positive number of milliseconds, got {0}")]
    InvalidInterval(u64),
}

/// Lists upstreams and their targets on a fixed interval and feeds the queue.
pub struct DiscoveryLoop {
    admin: Arc<dyn AdminApi>,
    queue: mpsc::Sender<Target>,
    interval: Duration,
}

impl DiscoveryLoop {
    pub fn new(
        admin: Arc<dyn AdminApi>,
        queue: mpsc::Sender<Target>,
        config: &HealthCheckConfig,
    ) -> Result<Self, DiscoveryError> {
        if config.interval_ms == 0 {
            return Err(DiscoveryError::InvalidInterval(config.interval_ms));
        }

        Ok(Self {
            admin,
            queue,
            interval: config.interval(),
        })
    }

    /// Tick until shutdown, then wait for in-flight fetches.
    ///
    /// The first tick fires one interval after start.
    pub async fn run(self, mut shutdown: broadcast::Receiver<()>) {
        tracing::info!(interval_ms = self.interval.as_millis() as u64, "Discovery loop starting");

        let mut ticker = time::interval_at(Instant::now() + self.interval, self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut fetches = JoinSet::new();
        let mut tick: u64 = 0;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    tick += 1;
                    self.discover(tick, &mut fetches).await;
                }
                Some(joined) = fetches.join_next(), if !fetches.is_empty() => {
                    log_join_error(joined);
                }
                _ = shutdown.recv() => {
                    tracing::info!("Discovery loop received shutdown signal, exiting loop");
                    break;
                }
            }
        }

        if !fetches.is_empty() {
            tracing::info!(in_flight = fetches.len(), "Waiting for in-flight target fetches");
        }
        while let Some(joined) = fetches.join_next().await {
            log_join_error(joined);
        }

        tracing::info!(ticks = tick, "Discovery loop stopped");
    }

    /// One discovery tick: list upstreams and fan out a fetch per upstream.
    async fn discover(&self, tick: u64, fetches: &mut JoinSet<()>) {
        while let Some(joined) = fetches.try_join_next() {
            log_join_error(joined);
        }
        if !fetches.is_empty() {
            tracing::debug!(tick, in_flight = fetches.len(), "Previous pass still queueing targets, skipping tick");
            metrics::record_discovery_skipped();
            return;
        }

        metrics::record_discovery_tick();

        let upstreams = match self.admin.list_upstreams().await {
            Ok(upstreams) => upstreams,
            Err(e) => {
                tracing::warn!(tick, error = %e, "Failed to fetch upstreams");
                metrics::record_discovery_failure("upstreams");
                return;
            }
        };

        tracing::debug!(tick, upstreams = upstreams.len(), "Fetched upstreams");

        for upstream in upstreams {
            let admin = Arc::clone(&self.admin);
            let queue = self.queue.clone();
            fetches.spawn(fetch_and_queue(admin, queue, upstream));
        }
    }
}

async fn fetch_and_queue(admin: Arc<dyn AdminApi>, queue: mpsc::Sender<Target>, upstream: Upstream) {
    let targets = match admin.list_targets(&upstream.id).await {
        Ok(targets) => targets,
        Err(e) => {
            tracing::warn!(upstream_id = %upstream.id, upstream = %upstream.name, error = %e, "Failed to fetch targets for upstream");
            metrics::record_discovery_failure("targets");
            return;
        }
    };

    for target in targets {
        if queue.send(target).await.is_err() {
            tracing::debug!(upstream_id = %upstream.id, "Target queue closed, dropping remaining targets");
            return;
        }
        metrics::record_target_enqueued();
    }
}

fn log_join_error(joined: Result<(), tokio::task::JoinError>) {
    if let Err(e) = joined {
        tracing::error!(error = %e, "Target fetch task failed");
    }
}
