//! File-backed notification store.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use super::{for_user, mark_all_read_in, mark_read_in};
use crate::core::{NewNotification, NotificationRecord, NotificationStore, NotifyError};
use crate::infra::json_file::{key_path, read_list, write_list};

/// Storage key used when none is configured.
pub const DEFAULT_NOTIFICATIONS_KEY: &str = "userNotifications";

/// Notification store persisted as one JSON array on disk.
///
/// File access runs on tokio's blocking pool, so callers must be inside a
/// tokio runtime.
#[derive(Debug)]
pub struct FileNotificationStore {
    path: PathBuf,
    // serializes read-modify-write cycles within this process
    write_lock: Arc<Mutex<()>>,
}

impl FileNotificationStore {
    /// Open (or create) the notifications stored under `key` in `dir`.
    pub fn new(dir: impl AsRef<Path>, key: &str) -> Result<Self, NotifyError> {
        Ok(Self {
            path: key_path(dir, key)?,
            write_lock: Arc::new(Mutex::new(())),
        })
    }

    /// File holding the notifications.
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn blocking<R, F>(&self, f: F) -> Result<R, NotifyError>
    where
        F: FnOnce(&Path) -> Result<R, NotifyError> + Send + 'static,
        R: Send + 'static,
    {
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || f(&path))
            .await
            .map_err(|e| NotifyError::Storage(format!("notification file task failed: {e}")))?
    }

    async fn update<R, F>(&self, f: F) -> Result<R, NotifyError>
    where
        F: FnOnce(&mut Vec<NotificationRecord>) -> R + Send + 'static,
        R: Send + 'static,
    {
        let lock = Arc::clone(&self.write_lock);
        self.blocking(move |path| {
            let _guard = lock.lock();
            let mut records = read_list(path);
            let result = f(&mut records);
            write_list(path, &records)?;
            Ok(result)
        })
        .await
    }
}

#[async_trait]
impl NotificationStore for FileNotificationStore {
    async fn create(
        &self,
        notification: NewNotification,
    ) -> Result<NotificationRecord, NotifyError> {
        let record = NotificationRecord::local(notification);
        let stored = record.clone();
        self.update(move |records| records.push(stored)).await?;
        Ok(record)
    }

    async fn list_for_user(&self, user_id: &str) -> Result<Vec<NotificationRecord>, NotifyError> {
        let user_id = user_id.to_owned();
        self.blocking(move |path| {
            let records: Vec<NotificationRecord> = read_list(path);
            Ok(for_user(&records, &user_id))
        })
        .await
    }

    async fn mark_read(&self, id: &str) -> Result<Option<NotificationRecord>, NotifyError> {
        let id = id.to_owned();
        self.update(move |records| mark_read_in(records, &id)).await
    }

    async fn mark_all_read(&self, user_id: &str) -> Result<(), NotifyError> {
        let user_id = user_id.to_owned();
        self.update(move |records| mark_all_read_in(records, &user_id))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_records_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileNotificationStore::new(dir.path(), DEFAULT_NOTIFICATIONS_KEY).unwrap();
        let created = store
            .create(NewNotification::new("u1", "Saved", "persisted"))
            .await
            .unwrap();
        drop(store);

        let reopened = FileNotificationStore::new(dir.path(), DEFAULT_NOTIFICATIONS_KEY).unwrap();
        assert_eq!(reopened.list_for_user("u1").await.unwrap(), vec![created]);
    }

    #[tokio::test]
    async fn test_mark_read_persists() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileNotificationStore::new(dir.path(), "notes").unwrap();
        let created = store
            .create(NewNotification::new("u1", "T", "m"))
            .await
            .unwrap();
        store.mark_read(&created.id).await.unwrap();

        let reopened = FileNotificationStore::new(dir.path(), "notes").unwrap();
        assert!(reopened.unread_for_user("u1").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_corrupted_file_lists_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileNotificationStore::new(dir.path(), "notes").unwrap();
        std::fs::write(store.path(), "garbage").unwrap();
        assert!(store.list_for_user("u1").await.unwrap().is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_creates_are_all_kept() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileNotificationStore::new(dir.path(), "notes").unwrap();

        let creates = (0..16).map(|i| store.create(NewNotification::new("u1", "T", format!("m{i}"))));
        let created = futures::future::join_all(creates).await;

        assert!(created.iter().all(Result::is_ok));
        assert_eq!(store.list_for_user("u1").await.unwrap().len(), 16);
        assert_eq!(store.unread_count("u1").await.unwrap(), 16);
    }
}
