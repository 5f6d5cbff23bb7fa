//! Server-backed notification store with a local fallback cache.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use super::{path_segment, ApiClient};
use crate::config::ApiConfig;
use crate::core::{
    filter_for_reservation, NewNotification, NotificationRecord, NotificationStore, NotifyError,
};

const CREATE_PATH: &str = "/api/notifications/create";
const READ_ALL_PATH: &str = "/api/notifications/read-all";
const UNREAD_PATH: &str = "/api/notifications/unread";
const COUNT_PATH: &str = "/api/notifications/count";

#[derive(Deserialize)]
struct UnreadCount {
    count: usize,
}

/// Notification store that talks to the backend and falls back to `local`
/// whenever a remote call fails.
pub struct HttpNotificationStore<L> {
    api: ApiClient,
    local: L,
}

impl<L> HttpNotificationStore<L> {
    /// Create a store for the configured backend with `local` as fallback.
    pub fn new(config: &ApiConfig, local: L) -> Result<Self, NotifyError> {
        Ok(Self {
            api: ApiClient::new(config)?,
            local,
        })
    }

    /// Fallback cache.
    pub const fn local(&self) -> &L {
        &self.local
    }
}

fn decode<T: DeserializeOwned>(body: Option<Value>) -> Result<T, NotifyError> {
    let body = body.ok_or_else(|| NotifyError::Delivery("empty response body".into()))?;
    serde_json::from_value(body)
        .map_err(|e| NotifyError::Delivery(format!("unexpected response shape: {e}")))
}

#[async_trait]
impl<L> NotificationStore for HttpNotificationStore<L>
where
    L: NotificationStore,
{
    async fn create(
        &self,
        notification: NewNotification,
    ) -> Result<NotificationRecord, NotifyError> {
        match self
            .api
            .post(CREATE_PATH, &notification)
            .await
            .and_then(decode)
        {
            Ok(record) => Ok(record),
            Err(err) => {
                tracing::warn!(error = %err, user_id = %notification.user_id, "create notification failed, storing locally");
                self.local.create(notification).await
            }
        }
    }

    async fn list_for_user(&self, user_id: &str) -> Result<Vec<NotificationRecord>, NotifyError> {
        let path = format!("/api/notifications/user/{}", path_segment(user_id));
        match self.api.get(&path).await.and_then(decode) {
            Ok(records) => Ok(records),
            Err(err) => {
                tracing::warn!(error = %err, %user_id, "fetch notifications failed, using local cache");
                self.local.list_for_user(user_id).await
            }
        }
    }

    async fn mark_read(&self, id: &str) -> Result<Option<NotificationRecord>, NotifyError> {
        let path = format!("/api/notifications/{}/read", path_segment(id));
        match self.api.put(&path).await {
            Ok(body) => Ok(body.and_then(|v| serde_json::from_value(v).ok())),
            Err(err) => {
                tracing::warn!(error = %err, notification_id = %id, "mark read failed, updating local cache");
                self.local.mark_read(id).await
            }
        }
    }

    async fn mark_all_read(&self, user_id: &str) -> Result<(), NotifyError> {
        match self.api.put(READ_ALL_PATH).await {
            Ok(_) => Ok(()),
            Err(err) => {
                tracing::warn!(error = %err, %user_id, "mark all read failed, updating local cache");
                self.local.mark_all_read(user_id).await
            }
        }
    }

    async fn unread_for_user(&self, user_id: &str) -> Result<Vec<NotificationRecord>, NotifyError> {
        match self.api.get(UNREAD_PATH).await.and_then(decode) {
            Ok(records) => Ok(records),
            Err(err) => {
                tracing::warn!(error = %err, %user_id, "fetch unread notifications failed, using local cache");
                self.local.unread_for_user(user_id).await
            }
        }
    }

    async fn unread_count(&self, user_id: &str) -> Result<usize, NotifyError> {
        match self.api.get(COUNT_PATH).await.and_then(decode::<UnreadCount>) {
            Ok(body) => Ok(body.count),
            Err(err) => {
                tracing::warn!(error = %err, %user_id, "fetch unread count failed, using local cache");
                self.local.unread_count(user_id).await
            }
        }
    }

    async fn list_for_reservation(
        &self,
        user_id: &str,
        reservation_id: &str,
    ) -> Result<Vec<NotificationRecord>, NotifyError> {
        let path = format!("/api/notifications/reservation/{}", path_segment(reservation_id));
        match self.api.get(&path).await.and_then(decode) {
            Ok(records) => Ok(records),
            Err(err) => {
                tracing::debug!(error = %err, %reservation_id, "reservation lookup failed, filtering user notifications");
                let records = self.list_for_user(user_id).await?;
                Ok(filter_for_reservation(records, reservation_id))
            }
        }
    }
}
