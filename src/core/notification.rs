//! In-app notification records and the store that keeps them.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::NotifyError;
use crate::util::clock::now;

/// Icon class used when the caller does not pick one.
pub const DEFAULT_ICON_CLASS: &str = "fas fa-bell";
/// Icon color used when the caller does not pick one.
pub const DEFAULT_ICON_COLOR: &str = "blue";
/// Prefix of ids minted locally rather than by the server.
pub const LOCAL_ID_PREFIX: &str = "local_";

/// A notification shown in the product UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationRecord {
    /// Server id, or a `local_` id when synthesized offline.
    pub id: String,
    /// Recipient account id.
    pub user_id: String,
    /// Short heading.
    pub title: String,
    /// Body text.
    pub message: String,
    /// CSS icon class.
    pub icon_class: String,
    /// Icon color name.
    pub icon_color: String,
    /// Whether the user has seen it.
    #[serde(default)]
    pub read: bool,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

impl NotificationRecord {
    /// Mint an unread record with a local id.
    pub fn local(notification: NewNotification) -> Self {
        Self {
            id: format!("{LOCAL_ID_PREFIX}{}", Uuid::new_v4().simple()),
            user_id: notification.user_id,
            title: notification.title,
            message: notification.message,
            icon_class: notification.icon_class,
            icon_color: notification.icon_color,
            read: false,
            created_at: now(),
        }
    }

    /// Whether the id was minted locally.
    pub fn is_local(&self) -> bool {
        self.id.starts_with(LOCAL_ID_PREFIX)
    }
}

/// Fields supplied when creating a notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewNotification {
    /// Recipient account id.
    pub user_id: String,
    /// Short heading.
    pub title: String,
    /// Body text.
    pub message: String,
    /// CSS icon class.
    pub icon_class: String,
    /// Icon color name.
    pub icon_color: String,
}

impl NewNotification {
    /// Create a notification with the default bell icon.
    pub fn new(
        user_id: impl Into<String>,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            title: title.into(),
            message: message.into(),
            icon_class: DEFAULT_ICON_CLASS.to_string(),
            icon_color: DEFAULT_ICON_COLOR.to_string(),
        }
    }

    /// Override the icon.
    #[must_use]
    pub fn with_icon(mut self, class: impl Into<String>, color: impl Into<String>) -> Self {
        self.icon_class = class.into();
        self.icon_color = color.into();
        self
    }
}

impl From<NotificationRecord> for NewNotification {
    fn from(record: NotificationRecord) -> Self {
        Self {
            user_id: record.user_id,
            title: record.title,
            message: record.message,
            icon_class: record.icon_class,
            icon_color: record.icon_color,
        }
    }
}

/// Keep records whose message mentions `reservation_id`.
pub fn filter_for_reservation(
    records: Vec<NotificationRecord>,
    reservation_id: &str,
) -> Vec<NotificationRecord> {
    records
        .into_iter()
        .filter(|n| n.message.contains(reservation_id))
        .collect()
}

/// Storage for in-app notifications.
#[async_trait]
pub trait NotificationStore: Send + Sync {
    /// Persist a new unread notification and return the stored record.
    async fn create(&self, notification: NewNotification)
        -> Result<NotificationRecord, NotifyError>;

    /// All notifications addressed to `user_id`, oldest first.
    async fn list_for_user(&self, user_id: &str) -> Result<Vec<NotificationRecord>, NotifyError>;

    /// Mark one notification read, returning it when found.
    async fn mark_read(&self, id: &str) -> Result<Option<NotificationRecord>, NotifyError>;

    /// Mark every notification of `user_id` read.
    async fn mark_all_read(&self, user_id: &str) -> Result<(), NotifyError>;

    /// Unread notifications of `user_id`.
    async fn unread_for_user(&self, user_id: &str) -> Result<Vec<NotificationRecord>, NotifyError> {
        let mut records = self.list_for_user(user_id).await?;
        records.retain(|n| !n.read);
        Ok(records)
    }

    /// Number of unread notifications of `user_id`.
    async fn unread_count(&self, user_id: &str) -> Result<usize, NotifyError> {
        Ok(self.unread_for_user(user_id).await?.len())
    }

    /// Notifications of `user_id` that concern one reservation.
    async fn list_for_reservation(
        &self,
        user_id: &str,
        reservation_id: &str,
    ) -> Result<Vec<NotificationRecord>, NotifyError> {
        let records = self.list_for_user(user_id).await?;
        Ok(filter_for_reservation(records, reservation_id))
    }
}

#[async_trait]
impl<S> NotificationStore for Box<S>
where
    S: NotificationStore + ?Sized,
{
    async fn create(
        &self,
        notification: NewNotification,
    ) -> Result<NotificationRecord, NotifyError> {
        (**self).create(notification).await
    }

    async fn list_for_user(&self, user_id: &str) -> Result<Vec<NotificationRecord>, NotifyError> {
        (**self).list_for_user(user_id).await
    }

    async fn mark_read(&self, id: &str) -> Result<Option<NotificationRecord>, NotifyError> {
        (**self).mark_read(id).await
    }

    async fn mark_all_read(&self, user_id: &str) -> Result<(), NotifyError> {
        (**self).mark_all_read(user_id).await
    }

    async fn unread_for_user(&self, user_id: &str) -> Result<Vec<NotificationRecord>, NotifyError> {
        (**self).unread_for_user(user_id).await
    }

    async fn unread_count(&self, user_id: &str) -> Result<usize, NotifyError> {
        (**self).unread_count(user_id).await
    }

    async fn list_for_reservation(
        &self,
        user_id: &str,
        reservation_id: &str,
    ) -> Result<Vec<NotificationRecord>, NotifyError> {
        (**self).list_for_reservation(user_id, reservation_id).await
    }
}
