//! Active health checking for Kong upstream targets.

pub mod admin_api;
pub mod cli;
pub mod config;
pub mod discovery;
pub mod health;
pub mod lifecycle;
pub mod observability;
pub mod worker;

pub use admin_api::{AdminApi, KongClient};
pub use config::HealthCheckerConfig;
pub use lifecycle::Supervisor;
