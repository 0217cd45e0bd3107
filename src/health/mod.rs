//! Health checking subsystem.
//!
//! # Data Flow
//! ```text
//! prober.rs (one per worker):
//!     Target from queue
//!     → probe.rs (TCP connect or HTTP GET, bounded by timeout)
//!     → state.rs (previous weight vs. probe outcome)
//!     → AdminApi::set_target_weight on a transition only
//! ```
//!
//! # Design Decisions
//! - No hysteresis: the latest probe result decides
//! - Health state is the load balancer's weight, not a local store
//! - Probe failures are the expected "down" signal, not errors

pub mod probe;
pub mod prober;
pub mod state;

pub use probe::{Probe, ProbeError, ProbeFailure};
pub use prober::{Prober, Reconciliation};
pub use state::{transition, HealthState};
