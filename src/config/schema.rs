//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the health
//! checker. All types derive Serde traits for deserialization from config files.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Root configuration for the health checker.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct HealthCheckerConfig {
    /// Load balancer admin API settings.
    pub admin: AdminConfig,

    /// Probe settings and discovery cadence.
    pub health_check: HealthCheckConfig,

    /// Worker pool and queue sizing.
    pub workers: WorkerConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Admin API connection settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AdminConfig {
    /// Base URL of the admin API (e.g., "http://localhost:8001").
    pub url: String,

    /// Per-request timeout in milliseconds.
    pub timeout_ms: u64,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:8001".to_string(),
            timeout_ms: 5000,
        }
    }
}

/// Probe protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CheckType {
    /// Open a TCP connection and close it.
    #[default]
    Tcp,
    /// GET `<target><path>`; 5xx counts as down.
    Http,
}

impl CheckType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckType::Tcp => "tcp",
            CheckType::Http => "http",
        }
    }
}

impl fmt::Display for CheckType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CheckType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tcp" => Ok(CheckType::Tcp),
            "http" => Ok(CheckType::Http),
            other => Err(format!("unsupported health check type {:?} (expected tcp or http)", other)),
        }
    }
}

/// Health check configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HealthCheckConfig {
    /// Discovery interval in milliseconds.
    pub interval_ms: u64,

    /// Path appended to the target address in http mode.
    pub path: String,

    /// Probe protocol.
    pub check_type: CheckType,

    /// Upper bound for a single probe in milliseconds.
    pub timeout_ms: u64,
}

impl HealthCheckConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for HealthCheckConfig {
    fn default() -> Self {
        Self {
            interval_ms: 2000,
            path: "/ping".to_string(),
            check_type: CheckType::Tcp,
            timeout_ms: 2000,
        }
    }
}

/// Worker pool configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WorkerConfig {
    /// Number of concurrent probe workers.
    pub count: usize,

    /// Capacity of the target queue between discovery and the workers.
    pub queue_length: usize,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            count: 100,
            queue_length: 100,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = HealthCheckerConfig::default();
        assert_eq!(config.admin.url, "http://localhost:8001");
        assert_eq!(config.health_check.interval(), Duration::from_millis(2000));
        assert_eq!(config.health_check.path, "/ping");
        assert_eq!(config.health_check.check_type, CheckType::Tcp);
        assert_eq!(config.workers.count, 100);
        assert_eq!(config.workers.queue_length, 100);
        assert!(!config.observability.metrics_enabled);
    }

    #[test]
    fn test_check_type_from_str() {
        assert_eq!("tcp".parse::<CheckType>().unwrap(), CheckType::Tcp);
        assert_eq!("HTTP".parse::<CheckType>().unwrap(), CheckType::Http);
        assert!("grpc".parse::<CheckType>().is_err());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: HealthCheckerConfig = toml::from_str(
            r#"
            [health_check]
            check_type = "http"
            interval_ms = 500
            "#,
        )
        .unwrap();
        assert_eq!(config.health_check.check_type, CheckType::Http);
        assert_eq!(config.health_check.interval_ms, 500);
        assert_eq!(config.health_check.path, "/ping");
        assert_eq!(config.workers.count, 100);
    }
}
