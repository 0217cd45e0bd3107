//! Worker subsystem.
//!
//! # Data Flow
//! ```text
//! discovery fetch tasks ──send──► queue.rs (bounded) ──recv──► pool.rs workers
//!                       (waits when full)            (waits when empty)
//! ```
//!
//! # Design Decisions
//! - The queue is the only coupling between discovery and probing
//! - Backpressure comes from the queue bound, never from dropping items
//! - Worker count is fixed for the life of the process

pub mod pool;
pub mod queue;

pub use pool::{PoolError, RunningPool, WorkerPool};
pub use queue::{bounded, WorkQueue};
