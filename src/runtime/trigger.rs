//! Opportunistic queue processing.
//!
//! Hosts call [`QueueTrigger::fire`] from whatever event suits them (a page
//! load, a reconnect, a timer they own). Each call spawns at most one pass;
//! a call that lands while a pass is running is a no-op.

use std::sync::Arc;

use crate::core::{DeliveryClient, NotifyError, QueueStore, RetryCoordinator};
use crate::runtime::Spawn;

/// Spawns queue passes on a runtime.
pub struct QueueTrigger<Q, D> {
    coordinator: Arc<RetryCoordinator<Q, D>>,
}

impl<Q, D> Clone for QueueTrigger<Q, D> {
    fn clone(&self) -> Self {
        Self {
            coordinator: Arc::clone(&self.coordinator),
        }
    }
}

impl<Q, D> QueueTrigger<Q, D>
where
    Q: QueueStore + Send + 'static,
    D: DeliveryClient + 'static,
{
    /// Create a trigger for `coordinator`.
    pub fn new(coordinator: Arc<RetryCoordinator<Q, D>>) -> Self {
        Self { coordinator }
    }

    /// Spawn one queue pass unless one is already running.
    pub fn fire<S: Spawn>(&self, spawner: &S) {
        if self.coordinator.is_processing() {
            tracing::debug!("queue pass already running, trigger ignored");
            return;
        }
        let coordinator = Arc::clone(&self.coordinator);
        spawner.spawn(async move {
            match coordinator.process_queue().await {
                Ok(report) => tracing::debug!(?report, "triggered queue pass finished"),
                Err(NotifyError::ProcessingInFlight) => {
                    tracing::debug!("queue pass already running, trigger ignored");
                }
                Err(err) => tracing::error!(error = %err, "triggered queue pass failed"),
            }
        });
    }
}
