//! Bounded multi-consumer work queue.
//!
//! Producers hold plain `mpsc::Sender`s, so a full queue suspends the
//! sender until a worker takes an item. Consumers share one receiver
//! behind an async mutex; each item is handed to exactly one consumer.
//! The queue closes once every sender is dropped, and `recv` returns
//! `None` after the remaining items are drained.

use std::sync::Arc;

use tokio::sync::{mpsc, Mutex};

/// Create a queue holding at most `capacity` items.
///
/// # Panics
/// Panics if `capacity` is zero; callers validate it first.
pub fn bounded<T>(capacity: usize) -> (mpsc::Sender<T>, WorkQueue<T>) {
    let (tx, rx) = mpsc::channel(capacity);
    (
        tx,
        WorkQueue {
            inner: Arc::new(Mutex::new(rx)),
        },
    )
}

/// Consumer side of the queue; clone one handle per worker.
#[derive(Debug)]
pub struct WorkQueue<T> {
    inner: Arc<Mutex<mpsc::Receiver<T>>>,
}

impl<T> Clone for WorkQueue<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> WorkQueue<T> {
    /// Wait for the next item. `None` means the queue is closed and empty.
    pub async fn recv(&self) -> Option<T> {
        self.inner.lock().await.recv().await
    }
}
