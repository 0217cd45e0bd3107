//! Fixed-size worker pool.
//!
//! # Responsibilities
//! - Launch N identical job routines against one shared queue
//! - Join every worker on stop
//!
//! # Design Decisions
//! - Shutdown is cooperative: workers exit when the queue closes
//! - Stopping never aborts a task, so an in-flight job always completes
//! - A job routine owns its own error handling; the pool only joins

use std::future::Future;

use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::Instrument;

use crate::worker::queue::WorkQueue;

/// Errors raised while building a pool.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PoolError {
    #[error("worker pool needs at least one worker")]
    NoWorkers,
}

/// A pool that has not been started yet.
pub struct WorkerPool<T, F> {
    count: usize,
    queue: WorkQueue<T>,
    job: F,
}

impl<T, F, Fut> WorkerPool<T, F>
where
    T: Send + 'static,
    F: Fn(WorkQueue<T>) -> Fut,
    Fut: Future<Output = ()> + Send + 'static,
{
    /// Create a pool of `count` workers, each running `job(queue)`.
    pub fn new(count: usize, queue: WorkQueue<T>, job: F) -> Result<Self, PoolError> {
        if count == 0 {
            return Err(PoolError::NoWorkers);
        }
        Ok(Self { count, queue, job })
    }

    /// Spawn every worker and return immediately.
    pub fn start(self) -> RunningPool {
        let workers = (0..self.count)
            .map(|id| {
                let job = (self.job)(self.queue.clone());
                tokio::spawn(job.instrument(tracing::debug_span!("worker", id)))
            })
            .collect();

        tracing::info!(workers = self.count, "Started workers for healthcheck");

        RunningPool { workers }
    }
}

/// Handles of a started pool.
#[derive(Debug)]
pub struct RunningPool {
    workers: Vec<JoinHandle<()>>,
}

impl RunningPool {
    /// Wait for every worker to exit.
    ///
    /// Workers exit once the queue is closed and drained, so close the
    /// queue (drop every sender) before awaiting this.
    pub async fn stop(self) {
        let total = self.workers.len();
        for worker in self.workers {
            if let Err(e) = worker.await {
                tracing::error!(error = %e, "Worker terminated abnormally");
            }
        }
        tracing::info!(workers = total, "All workers stopped");
    }
}
