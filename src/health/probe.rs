//! Liveness probes.
//!
//! # Responsibilities
//! - TCP: connect to the target and close the connection immediately
//! - HTTP: GET `<target><path>`, 5xx or transport error means down
//! - Bound every probe by the configured timeout

use std::time::Duration;

use thiserror::Error;
use tokio::net::TcpStream;
use tokio::time;

use crate::config::{CheckType, HealthCheckConfig};

/// Errors raised while building a probe.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("failed to build HTTP probe client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Why a target was considered down.
#[derive(Debug, Error)]
pub enum ProbeFailure {
    #[error("probe timed out after {0:?}")]
    Timeout(Duration),

    #[error("connection failed: {0}")]
    Connect(#[from] std::io::Error),

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("server not available: status {0}")]
    ServerError(u16),
}

/// A configured liveness check.
#[derive(Debug, Clone)]
pub enum Probe {
    Tcp {
        timeout: Duration,
    },
    Http {
        client: reqwest::Client,
        path: String,
        timeout: Duration,
    },
}

impl Probe {
    pub fn from_config(config: &HealthCheckConfig) -> Result<Self, ProbeError> {
        let timeout = config.timeout();
        match config.check_type {
            CheckType::Tcp => Ok(Probe::Tcp { timeout }),
            CheckType::Http => {
                let client = reqwest::Client::builder()
                    .timeout(timeout)
                    .no_proxy()
                    .user_agent(concat!("kong-healthcheck/", env!("CARGO_PKG_VERSION")))
                    .build()?;
                Ok(Probe::Http {
                    client,
                    path: config.path.clone(),
                    timeout,
                })
            }
        }
    }

    pub fn check_type(&self) -> CheckType {
        match self {
            Probe::Tcp { .. } => CheckType::Tcp,
            Probe::Http { .. } => CheckType::Http,
        }
    }

    /// Probe `address` (`host:port`, or a full URL in http mode).
    pub async fn check(&self, address: &str) -> Result<(), ProbeFailure> {
        match self {
            Probe::Tcp { timeout } => tcp_check(address, *timeout).await,
            Probe::Http {
                client,
                path,
                timeout,
            } => http_check(client, &probe_url(address, path), *timeout).await,
        }
    }
}

async fn tcp_check(address: &str, timeout: Duration) -> Result<(), ProbeFailure> {
    let stream = time::timeout(timeout, TcpStream::connect(address))
        .await
        .map_err(|_| ProbeFailure::Timeout(timeout))??;
    drop(stream);
    Ok(())
}

async fn http_check(client: &reqwest::Client, url: &str, timeout: Duration) -> Result<(), ProbeFailure> {
    let response = client.get(url).send().await.map_err(|e| {
        if e.is_timeout() {
            ProbeFailure::Timeout(timeout)
        } else {
            ProbeFailure::Request(e)
        }
    })?;

    let status = response.status();
    if status.is_server_error() {
        return Err(ProbeFailure::ServerError(status.as_u16()));
    }
    Ok(())
}

/// Targets are registered as `host:port`; default them to plain HTTP.
pub(crate) fn probe_url(address: &str, path: &str) -> String {
    if address.contains("://") {
        format!("{}{}", address, path)
    } else {
        format!("http://{}{}", address, path)
    }
}
