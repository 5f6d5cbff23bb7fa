//! Retry coordinator: immediate delivery with queued, bounded retries.
//!
//! [`RetryCoordinator::notify`] tries a delivery once and parks the job in the
//! queue store on failure. [`RetryCoordinator::process_queue`] is invoked
//! opportunistically by the host (page load, a trigger, a cron) and walks the
//! queue in insertion order:
//!
//! 1. jobs already at `max_attempts` are dropped;
//! 2. otherwise `attempts` is incremented and the job redelivered;
//! 3. delivered jobs are dropped;
//! 4. failed jobs are kept unless they just reached `max_attempts`.
//!
//! The retained list is written back once at the end of the pass.

use std::sync::atomic::{AtomicBool, Ordering};

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::core::{DeliveryClient, NotifyError, QueueStore, QueuedJob};

/// Default bound on redelivery attempts per job.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Result of [`RetryCoordinator::notify`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "reason", rename_all = "snake_case")]
pub enum NotifyOutcome {
    /// Delivered on the first try.
    Delivered,
    /// Delivery failed; the job waits in the queue.
    Queued,
    /// Not delivered and not queued.
    Rejected(String),
}

impl NotifyOutcome {
    /// Whether the job is now in the queue.
    pub const fn is_queued(&self) -> bool {
        matches!(self, Self::Queued)
    }
}

/// Counters produced by one queue pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessReport {
    /// Jobs delivered during the pass.
    pub succeeded: usize,
    /// Jobs that failed during the pass, exhausted ones included.
    pub failed: usize,
    /// Jobs left in the queue afterwards.
    pub remaining: usize,
    /// Jobs dropped for reaching the attempt bound.
    pub exhausted: usize,
}

/// Releases the in-flight flag when a pass ends, including on early return.
struct InFlightGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// Bridges delivery failures into a queue store and drives later retries.
pub struct RetryCoordinator<Q, D> {
    store: Mutex<Q>,
    delivery: D,
    max_attempts: u32,
    processing: AtomicBool,
}

impl<Q, D> RetryCoordinator<Q, D> {
    /// Create a coordinator with the default attempt bound.
    pub fn new(store: Q, delivery: D) -> Self {
        Self::with_max_attempts(store, delivery, DEFAULT_MAX_ATTEMPTS)
    }

    /// Create a coordinator with a custom attempt bound (at least 1).
    pub fn with_max_attempts(store: Q, delivery: D, max_attempts: u32) -> Self {
        Self {
            store: Mutex::new(store),
            delivery,
            max_attempts: max_attempts.max(1),
            processing: AtomicBool::new(false),
        }
    }

    /// Attempt bound applied by queue passes.
    pub const fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Delivery client in use.
    pub const fn delivery(&self) -> &D {
        &self.delivery
    }

    /// Whether a queue pass is currently running.
    pub fn is_processing(&self) -> bool {
        self.processing.load(Ordering::Acquire)
    }
}

impl<Q, D> RetryCoordinator<Q, D>
where
    Q: QueueStore + Send,
    D: DeliveryClient,
{
    /// Deliver `job` now, or queue it for a later pass if delivery fails.
    ///
    /// Failures are absorbed into the outcome; this never returns an error.
    pub async fn notify(&self, job: QueuedJob) -> NotifyOutcome {
        if let Err(err) = job.payload.validate() {
            tracing::warn!(job_id = %job.id, kind = %job.kind(), error = %err, "rejecting invalid job");
            return NotifyOutcome::Rejected(err.to_string());
        }

        match self.delivery.deliver(&job.payload).await {
            Ok(()) => {
                tracing::info!(job_id = %job.id, kind = %job.kind(), "notification delivered");
                NotifyOutcome::Delivered
            }
            Err(err) => {
                tracing::warn!(
                    job_id = %job.id,
                    kind = %job.kind(),
                    error = %err,
                    "delivery failed, queueing for retry"
                );
                let job_id = job.id;
                let mut store = self.store.lock().await;
                match store.enqueue(job) {
                    Ok(()) => NotifyOutcome::Queued,
                    Err(queue_err) => {
                        tracing::error!(%job_id, error = %queue_err, "failed to queue notification");
                        NotifyOutcome::Rejected(format!("{err}; {queue_err}"))
                    }
                }
            }
        }
    }

    /// Retry every queued job once, in insertion order.
    ///
    /// Returns [`NotifyError::ProcessingInFlight`] if another pass is running
    /// and [`NotifyError::Storage`] if the retained list cannot be written.
    pub async fn process_queue(&self) -> Result<ProcessReport, NotifyError> {
        let _guard =
            InFlightGuard::acquire(&self.processing).ok_or(NotifyError::ProcessingInFlight)?;

        // Held for the whole pass so a concurrent enqueue is not lost to the
        // batch commit below.
        let mut store = self.store.lock().await;
        let jobs = store.load();
        if jobs.is_empty() {
            return Ok(ProcessReport::default());
        }
        tracing::info!(count = jobs.len(), "processing queued notifications");

        let mut report = ProcessReport::default();
        let mut retained = Vec::with_capacity(jobs.len());

        for mut job in jobs {
            if job.attempts >= self.max_attempts {
                tracing::warn!(
                    job_id = %job.id,
                    kind = %job.kind(),
                    attempts = job.attempts,
                    "job exceeded max attempts, dropping"
                );
                report.failed += 1;
                report.exhausted += 1;
                continue;
            }

            job.attempts += 1;
            match self.delivery.deliver(&job.payload).await {
                Ok(()) => {
                    tracing::info!(job_id = %job.id, kind = %job.kind(), attempts = job.attempts, "queued notification delivered");
                    report.succeeded += 1;
                }
                Err(err) => {
                    report.failed += 1;
                    if job.attempts >= self.max_attempts {
                        tracing::warn!(
                            job_id = %job.id,
                            kind = %job.kind(),
                            attempts = job.attempts,
                            error = %err,
                            "retry failed on last attempt, dropping"
                        );
                        report.exhausted += 1;
                    } else {
                        tracing::debug!(
                            job_id = %job.id,
                            attempts = job.attempts,
                            error = %err,
                            "retry failed, keeping job"
                        );
                        retained.push(job);
                    }
                }
            }
        }

        report.remaining = retained.len();
        store.save(&retained)?;
        tracing::info!(
            succeeded = report.succeeded,
            failed = report.failed,
            remaining = report.remaining,
            "queue pass finished"
        );
        Ok(report)
    }

    /// Snapshot of the queued jobs.
    pub async fn pending(&self) -> Vec<QueuedJob> {
        self.store.lock().await.load()
    }
}
