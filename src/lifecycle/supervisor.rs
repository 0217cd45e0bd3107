//! Pipeline start/stop orchestration.
//!
//! # Responsibilities
//! - Validate configuration and build every component before anything runs
//! - Start the worker pool, then the discovery loop
//! - Stop in order: discovery (closes the queue), then workers (drain it)
//!
//! # Design Decisions
//! - Fail fast: every construction error is returned from `start`
//! - `stop` never aborts a task; it returns once all in-flight work is done

use std::sync::Arc;

use thiserror::Error;
use tokio::task::JoinHandle;

use crate::admin_api::AdminApi;
use crate::config::loader::join_errors;
use crate::config::{validate_config, HealthCheckerConfig, ValidationError};
use crate::discovery::{DiscoveryError, DiscoveryLoop};
use crate::health::{ProbeError, Prober};
use crate::lifecycle::shutdown::Shutdown;
use crate::worker::{self, PoolError, RunningPool, WorkerPool};

/// Errors that prevent the pipeline from starting.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {}", join_errors(.0))]
    Config(Vec<ValidationError>),

    #[error(transparent)]
    Discovery(#[from] DiscoveryError),

    #[error(transparent)]
    Probe(#[from] ProbeError),

    #[error(transparent)]
    Pool(#[from] PoolError),
}

/// A running health-check pipeline.
pub struct Supervisor {
    shutdown: Shutdown,
    discovery: JoinHandle<()>,
    workers: RunningPool,
}

impl Supervisor {
    /// Build and launch discovery and the worker pool. Does not block.
    pub fn start(config: &HealthCheckerConfig, admin: Arc<dyn AdminApi>) -> Result<Self, StartupError> {
        validate_config(config).map_err(StartupError::Config)?;

        let (sender, queue) = worker::bounded(config.workers.queue_length);
        let prober = Prober::new(Arc::clone(&admin), &config.health_check)?;
        let discovery = DiscoveryLoop::new(admin, sender, &config.health_check)?;
        let pool = WorkerPool::new(config.workers.count, queue, move |queue| prober.clone().run(queue))?;

        let shutdown = Shutdown::new();
        let workers = pool.start();
        let discovery = tokio::spawn(discovery.run(shutdown.subscribe()));

        tracing::info!(
            check_type = %config.health_check.check_type,
            interval_ms = config.health_check.interval_ms,
            workers = config.workers.count,
            queue_length = config.workers.queue_length,
            "Health check pipeline started"
        );

        Ok(Self {
            shutdown,
            discovery,
            workers,
        })
    }

    /// Stop discovery, drain the queue and wait for every worker.
    pub async fn stop(self) {
        self.shutdown.trigger();

        if let Err(e) = self.discovery.await {
            tracing::error!(error = %e, "Discovery loop terminated abnormally");
        }

        self.workers.stop().await;
        tracing::info!("Health check pipeline stopped");
    }
}
