//! Target health state machine.
//!
//! # States
//! - Healthy: weight > 0, target receives traffic
//! - Unhealthy: weight <= 0, target excluded by the load balancer
//!
//! # State Transitions
//! ```text
//! Healthy   → Unhealthy: probe fails       (write UNHEALTHY_WEIGHT)
//! Unhealthy → Healthy:   probe succeeds    (write HEALTHY_WEIGHT)
//! otherwise:             no write
//! ```
//!
//! The state lives in the load balancer's weight field and is re-read on
//! every discovery tick; nothing is kept in memory between passes.

use crate::admin_api::{HEALTHY_WEIGHT, UNHEALTHY_WEIGHT};

/// Health of a target as seen by the load balancer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthState {
    Healthy,
    Unhealthy,
}

impl HealthState {
    /// Interpret a load balancer weight.
    pub fn from_weight(weight: i64) -> Self {
        if weight > 0 {
            HealthState::Healthy
        } else {
            HealthState::Unhealthy
        }
    }

    /// Interpret a probe outcome.
    pub fn from_probe(reachable: bool) -> Self {
        if reachable {
            HealthState::Healthy
        } else {
            HealthState::Unhealthy
        }
    }

    /// Weight that encodes this state.
    pub fn weight(self) -> i64 {
        match self {
            HealthState::Healthy => HEALTHY_WEIGHT,
            HealthState::Unhealthy => UNHEALTHY_WEIGHT,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            HealthState::Healthy => "healthy",
            HealthState::Unhealthy => "unhealthy",
        }
    }
}

/// Decide whether a probe result requires a weight write.
///
/// Returns the new state when the probe contradicts `previous_weight`,
/// `None` when the load balancer already agrees with the observation.
pub fn transition(previous_weight: i64, reachable: bool) -> Option<HealthState> {
    let current = HealthState::from_weight(previous_weight);
    let observed = HealthState::from_probe(reachable);
    (current != observed).then_some(observed)
}
