//! Command-line interface.
//!
//! Flags override values from the optional TOML config file.

use std::path::PathBuf;

use clap::Parser;
use thiserror::Error;

use crate::config::{
    parse_interval, read_config, CheckType, ConfigError, HealthCheckerConfig, ValidationError,
};

#[derive(Debug, Error)]
pub enum CliError {
    #[error("`kong` flag did not provide kong host")]
    MissingKongHost,

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Interval(#[from] ValidationError),
}

#[derive(Debug, Parser)]
#[command(name = "kong-healthcheck")]
#[command(about = "Active health checks for load balancer targets", long_about = None)]
pub struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Kong host, e.g. http://kong.internal
    #[arg(long)]
    pub kong: Option<String>,

    /// Kong admin port.
    #[arg(long, default_value = "8001")]
    pub kong_admin_port: u16,

    /// Health check interval in ms.
    #[arg(long)]
    pub health_check_interval: Option<String>,

    /// Path to check for active health check.
    #[arg(long)]
    pub health_check_path: Option<String>,

    /// Health check type: http or tcp.
    #[arg(long)]
    pub health_check_type: Option<CheckType>,

    /// Number of workers which participate in healthcheck of targets.
    #[arg(long)]
    pub worker_count: Option<usize>,

    /// Length of the queue for storing targets.
    #[arg(long)]
    pub targets_queue_length: Option<usize>,

    /// Timeout for a single probe in ms.
    #[arg(long)]
    pub probe_timeout_ms: Option<u64>,
}

impl Cli {
    /// Build the effective configuration: file (or defaults), then flags.
    ///
    /// Semantic validation happens when the pipeline starts.
    pub fn into_config(self) -> Result<HealthCheckerConfig, CliError> {
        let mut config = match &self.config {
            Some(path) => read_config(path)?,
            None => HealthCheckerConfig::default(),
        };

        match self.kong.as_deref().map(str::trim) {
            Some("") => return Err(CliError::MissingKongHost),
            Some(host) => config.admin.url = admin_url(host, self.kong_admin_port),
            None if self.config.is_none() => return Err(CliError::MissingKongHost),
            None => {}
        }

        let hc = &mut config.health_check;
        if let Some(raw) = &self.health_check_interval {
            hc.interval_ms = parse_interval(raw)?.as_millis() as u64;
        }
        if let Some(path) = self.health_check_path {
            hc.path = path;
        }
        if let Some(check_type) = self.health_check_type {
            hc.check_type = check_type;
        }
        if let Some(timeout) = self.probe_timeout_ms {
            hc.timeout_ms = timeout;
        }
        if let Some(count) = self.worker_count {
            config.workers.count = count;
        }
        if let Some(length) = self.targets_queue_length {
            config.workers.queue_length = length;
        }

        Ok(config)
    }
}

fn admin_url(host: &str, port: u16) -> String {
    let host = host.trim_end_matches('/');
    if host.contains("://") {
        format!("{}:{}", host, port)
    } else {
        format!("http://{}:{}", host, port)
    }
}
