//! Upstream/target records and admin API errors.

use thiserror::Error;

/// Weight written when a target starts failing probes.
pub const UNHEALTHY_WEIGHT: i64 = 0;

/// Weight written when a previously unhealthy target recovers.
///
/// The load balancer reads any positive weight as "receives traffic"; the
/// checker only ever writes this value or [`UNHEALTHY_WEIGHT`], never a
/// partial share.
pub const HEALTHY_WEIGHT: i64 = 100;

/// A logical service registered with the load balancer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upstream {
    pub id: String,
    pub name: String,
}

/// One backend instance registered under an upstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub id: String,
    /// `host:port` as registered with the load balancer.
    pub url: String,
    /// Weight observed at discovery time.
    pub weight: i64,
    pub upstream_id: String,
}

/// Errors returned by the admin API.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The configured admin URL cannot be used to build endpoints.
    #[error("invalid admin URL: {0}")]
    InvalidUrl(String),

    /// Connection, timeout or protocol failure.
    #[error("admin request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The admin API answered with an error status.
    #[error("admin API returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// Response body was not the expected JSON document.
    #[error("failed to decode admin response: {0}")]
    Decode(#[from] serde_json::Error),

    /// A target carried a weight that is not an integer.
    #[error("target {target} has non-numeric weight {value:?}")]
    InvalidWeight { target: String, value: String },
}

/// Result type for admin API calls.
pub type FetchResult<T> = Result<T, FetchError>;
