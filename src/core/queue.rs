//! Queue store abstraction for pending notification jobs.

use crate::core::{NotifyError, QueuedJob};

/// Durable, ordered storage of queued jobs.
///
/// There is no partial-update API: callers load the full list, change it in
/// memory and save the full list back. Only the retry coordinator mutates a
/// store, one writer at a time.
pub trait QueueStore {
    /// Return all jobs in insertion order.
    ///
    /// Missing or unreadable data yields an empty list; this never fails.
    fn load(&self) -> Vec<QueuedJob>;

    /// Replace the stored list with `jobs` in a single write.
    fn save(&mut self, jobs: &[QueuedJob]) -> Result<(), NotifyError>;

    /// Append one job to the end of the stored list.
    fn enqueue(&mut self, job: QueuedJob) -> Result<(), NotifyError> {
        let mut jobs = self.load();
        jobs.push(job);
        self.save(&jobs)
    }

    /// Number of stored jobs.
    fn len(&self) -> usize {
        self.load().len()
    }

    /// Whether the store holds no jobs.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<Q> QueueStore for Box<Q>
where
    Q: QueueStore + ?Sized,
{
    fn load(&self) -> Vec<QueuedJob> {
        (**self).load()
    }

    fn save(&mut self, jobs: &[QueuedJob]) -> Result<(), NotifyError> {
        (**self).save(jobs)
    }

    fn enqueue(&mut self, job: QueuedJob) -> Result<(), NotifyError> {
        (**self).enqueue(job)
    }

    fn len(&self) -> usize {
        (**self).len()
    }
}
