//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! discovery, prober, pool, supervisor produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (counters)
//!
//! Consumers:
//!     → stdout (pretty or JSON)
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```
//!
//! # Design Decisions
//! - Every soft failure is visible only here, so each one is logged
//! - Log fields name the upstream and target involved
//! - Metrics are disabled by default

pub mod logging;
pub mod metrics;
