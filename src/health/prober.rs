//! Per-target prober, the job routine run by every worker.
//!
//! # Responsibilities
//! - Pull targets off the shared queue until it closes
//! - Probe each target once
//! - Write a new weight only when the probe contradicts the current one
//!
//! # Design Decisions
//! - The previous weight is the one read by discovery for this pass
//! - A failed weight write is logged and dropped; the next tick retries
//!   by observing the same stale weight again

use std::sync::Arc;

use crate::admin_api::{AdminApi, Target};
use crate::config::HealthCheckConfig;
use crate::health::probe::{Probe, ProbeError};
use crate::health::state::{transition, HealthState};
use crate::observability::metrics;
use crate::worker::WorkQueue;

/// Result of one pass over a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reconciliation {
    /// Probe agreed with the current weight.
    Unchanged,
    /// Weight was rewritten to match the new state.
    Updated(HealthState),
    /// A write was needed but the admin API rejected it.
    Failed(HealthState),
}

/// Probes targets and reconciles their weights.
#[derive(Clone)]
pub struct Prober {
    admin: Arc<dyn AdminApi>,
    probe: Probe,
}

impl Prober {
    pub fn new(admin: Arc<dyn AdminApi>, config: &HealthCheckConfig) -> Result<Self, ProbeError> {
        Ok(Self {
            admin,
            probe: Probe::from_config(config)?,
        })
    }

    pub fn with_probe(admin: Arc<dyn AdminApi>, probe: Probe) -> Self {
        Self { admin, probe }
    }

    /// Worker loop: runs until the queue is closed and drained.
    pub async fn run(self, queue: WorkQueue<Target>) {
        while let Some(target) = queue.recv().await {
            self.check_target(target).await;
        }
        tracing::debug!("Target queue closed, worker exiting");
    }

    /// Probe one target and reconcile its weight.
    pub async fn check_target(&self, target: Target) -> Reconciliation {
        tracing::debug!(target_url = %target.url, upstream_id = %target.upstream_id, "Pinging target");

        let previous_weight = target.weight;
        let outcome = self.probe.check(&target.url).await;
        let reachable = outcome.is_ok();
        metrics::record_probe(self.probe.check_type().as_str(), reachable);

        if let Err(reason) = &outcome {
            tracing::debug!(target_url = %target.url, reason = %reason, "Probe failed");
        }

        let Some(next) = transition(previous_weight, reachable) else {
            return Reconciliation::Unchanged;
        };

        match next {
            HealthState::Unhealthy => {
                tracing::warn!(target_url = %target.url, upstream_id = %target.upstream_id, "Target is down, marking it as unhealthy")
            }
            HealthState::Healthy => {
                tracing::info!(target_url = %target.url, upstream_id = %target.upstream_id, "Target is up, marking it as healthy")
            }
        }

        match self
            .admin
            .set_target_weight(&target.upstream_id, &target.url, next.weight())
            .await
        {
            Ok(()) => {
                metrics::record_weight_update(next.as_str(), true);
                Reconciliation::Updated(next)
            }
            Err(e) => {
                tracing::error!(
                    target_url = %target.url,
                    upstream_id = %target.upstream_id,
                    error = %e,
                    "Failed to mark target as {}",
                    next.as_str()
                );
                metrics::record_weight_update(next.as_str(), false);
                Reconciliation::Failed(next)
            }
        }
    }
}
