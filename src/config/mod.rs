//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → CLI flag overrides (cli.rs)
//!     → validation.rs (semantic checks)
//!     → HealthCheckerConfig (validated, immutable)
//!     → passed by reference into discovery and prober constructors
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no hot reload
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, read_config, ConfigError};
pub use schema::{
    AdminConfig, CheckType, HealthCheckConfig, HealthCheckerConfig, LogFormat,
    ObservabilityConfig, WorkerConfig,
};
pub use validation::{parse_interval, validate_config, ValidationError};
