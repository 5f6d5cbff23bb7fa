//! File-backed queue store.
//!
//! The whole queue lives in one JSON array under a storage key
//! (`<dir>/<key>.json`), mirroring a browser `localStorage` entry. Every save
//! rewrites the file.

use std::path::{Path, PathBuf};

use crate::core::{NotifyError, QueueStore, QueuedJob};
use crate::infra::json_file::{key_path, read_list, write_list};

/// Storage key used when none is configured.
pub const DEFAULT_QUEUE_KEY: &str = "emailQueue";

/// Queue store persisted as a JSON file.
///
/// File I/O runs inline on the calling task: one write per queued failure and
/// one per queue pass.
#[derive(Debug, Clone)]
pub struct FileQueueStore {
    path: PathBuf,
}

impl FileQueueStore {
    /// Open (or create) the queue stored under `key` in `dir`.
    pub fn new(dir: impl AsRef<Path>, key: &str) -> Result<Self, NotifyError> {
        let path = key_path(dir, key)?;
        tracing::debug!(path = %path.display(), "opened file queue store");
        Ok(Self { path })
    }

    /// File holding the queue.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl QueueStore for FileQueueStore {
    fn load(&self) -> Vec<QueuedJob> {
        read_list(&self.path)
    }

    fn save(&mut self, jobs: &[QueuedJob]) -> Result<(), NotifyError> {
        write_list(&self.path, jobs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Reservation, ReservationStatus};

    #[test]
    fn test_reopen_keeps_jobs_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let a = QueuedJob::user_status_update(
            Reservation::new("a").with_room("A101"),
            ReservationStatus::Approved,
            None,
        )
        .unwrap();
        let b = QueuedJob::admin_new_request(serde_json::json!({"room": "B2"})).unwrap();

        let mut store = FileQueueStore::new(dir.path(), DEFAULT_QUEUE_KEY).unwrap();
        store.enqueue(a.clone()).unwrap();
        store.enqueue(b.clone()).unwrap();
        drop(store);

        let reopened = FileQueueStore::new(dir.path(), DEFAULT_QUEUE_KEY).unwrap();
        assert_eq!(reopened.load(), vec![a, b]);
    }

    #[test]
    fn test_corrupted_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileQueueStore::new(dir.path(), DEFAULT_QUEUE_KEY).unwrap();
        std::fs::write(store.path(), "[{ not json").unwrap();
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_save_empty_clears_queue() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileQueueStore::new(dir.path(), "q").unwrap();
        store
            .enqueue(QueuedJob::admin_new_request(serde_json::json!({"id": 1})).unwrap())
            .unwrap();
        store.save(&[]).unwrap();
        assert!(store.is_empty());
    }
}
