//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (supervisor.rs):
//!     Validate config → Build prober, discovery, pool → Start workers → Start discovery
//!
//! Shutdown (supervisor.rs + shutdown.rs):
//!     Signal received → Stop ticking → Await in-flight fetches → Close queue
//!     → Workers drain queue and exit → Return
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger graceful shutdown
//! ```
//!
//! # Design Decisions
//! - Ordered startup: consumers before producers
//! - Ordered shutdown: producers before consumers, so no send-after-close
//! - No forced exit: shutdown latency is bounded by probe and admin timeouts

pub mod shutdown;
pub mod signals;
pub mod supervisor;

pub use shutdown::Shutdown;
pub use supervisor::{StartupError, Supervisor};
