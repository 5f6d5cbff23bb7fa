//! In-memory notification store.

use async_trait::async_trait;
use parking_lot::Mutex;

use super::{for_user, mark_all_read_in, mark_read_in};
use crate::core::{NewNotification, NotificationRecord, NotificationStore, NotifyError};

/// Notification store for development/testing.
#[derive(Debug, Default)]
pub struct InMemoryNotificationStore {
    records: Mutex<Vec<NotificationRecord>>,
}

impl InMemoryNotificationStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every stored record.
    pub fn all(&self) -> Vec<NotificationRecord> {
        self.records.lock().clone()
    }
}

#[async_trait]
impl NotificationStore for InMemoryNotificationStore {
    async fn create(
        &self,
        notification: NewNotification,
    ) -> Result<NotificationRecord, NotifyError> {
        let record = NotificationRecord::local(notification);
        self.records.lock().push(record.clone());
        Ok(record)
    }

    async fn list_for_user(&self, user_id: &str) -> Result<Vec<NotificationRecord>, NotifyError> {
        Ok(for_user(&self.records.lock(), user_id))
    }

    async fn mark_read(&self, id: &str) -> Result<Option<NotificationRecord>, NotifyError> {
        Ok(mark_read_in(&mut self.records.lock(), id))
    }

    async fn mark_all_read(&self, user_id: &str) -> Result<(), NotifyError> {
        mark_all_read_in(&mut self.records.lock(), user_id);
        Ok(())
    }
}
