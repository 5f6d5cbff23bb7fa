//! In-memory queue store for development and tests.

use crate::core::{NotifyError, QueueStore, QueuedJob};

/// Queue store keeping jobs in a vector; contents are lost on drop.
#[derive(Debug, Default, Clone)]
pub struct InMemoryQueueStore {
    jobs: Vec<QueuedJob>,
}

impl InMemoryQueueStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `jobs`, in order.
    pub fn with_jobs(jobs: Vec<QueuedJob>) -> Self {
        Self { jobs }
    }
}

impl QueueStore for InMemoryQueueStore {
    fn load(&self) -> Vec<QueuedJob> {
        self.jobs.clone()
    }

    fn save(&mut self, jobs: &[QueuedJob]) -> Result<(), NotifyError> {
        self.jobs = jobs.to_vec();
        Ok(())
    }

    fn enqueue(&mut self, job: QueuedJob) -> Result<(), NotifyError> {
        self.jobs.push(job);
        Ok(())
    }

    fn len(&self) -> usize {
        self.jobs.len()
    }
}
