//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (interval > 0, at least one worker)
//! - Parse the string form of the discovery interval
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Runs before any loop is started; every error here is fatal

use std::net::SocketAddr;
use std::time::Duration;

use thiserror::Error;
use url::Url;

use crate::config::schema::{CheckType, HealthCheckerConfig};

/// A single semantic problem with the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("health check interval must be a positive integer of milliseconds, got {0:?}")]
    InvalidInterval(String),

    #[error("health check timeout must be positive")]
    ZeroProbeTimeout,

    #[error("health check path must be empty or start with '/', got {0:?}")]
    InvalidPath(String),

    #[error("worker count must be at least 1")]
    NoWorkers,

    #[error("target queue length must be at least 1")]
    ZeroQueueLength,

    #[error("admin URL {0:?} is not a valid base URL")]
    InvalidAdminUrl(String),

    #[error("admin timeout must be positive")]
    ZeroAdminTimeout,

    #[error("metrics address {0:?} is not a socket address")]
    InvalidMetricsAddress(String),
}

/// Parse a discovery interval given as a string of milliseconds.
pub fn parse_interval(raw: &str) -> Result<Duration, ValidationError> {
    match raw.trim().parse::<i64>() {
        Ok(ms) if ms > 0 => Ok(Duration::from_millis(ms as u64)),
        _ => Err(ValidationError::InvalidInterval(raw.to_string())),
    }
}

/// Check a parsed configuration, collecting every problem found.
pub fn validate_config(config: &HealthCheckerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let hc = &config.health_check;
    if hc.interval_ms == 0 {
        errors.push(ValidationError::InvalidInterval(hc.interval_ms.to_string()));
    }
    if hc.timeout_ms == 0 {
        errors.push(ValidationError::ZeroProbeTimeout);
    }
    if hc.check_type == CheckType::Http && !hc.path.is_empty() && !hc.path.starts_with('/') {
        errors.push(ValidationError::InvalidPath(hc.path.clone()));
    }

    if config.workers.count == 0 {
        errors.push(ValidationError::NoWorkers);
    }
    if config.workers.queue_length == 0 {
        errors.push(ValidationError::ZeroQueueLength);
    }

    match Url::parse(&config.admin.url) {
        Ok(url) if !url.cannot_be_a_base() => {}
        _ => errors.push(ValidationError::InvalidAdminUrl(config.admin.url.clone())),
    }
    if config.admin.timeout_ms == 0 {
        errors.push(ValidationError::ZeroAdminTimeout);
    }

    let obs = &config.observability;
    if obs.metrics_enabled && obs.metrics_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidMetricsAddress(obs.metrics_address.clone()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
