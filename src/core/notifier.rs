//! Reservation notification service.
//!
//! Entry point for the dashboard: validates requests, runs them through the
//! [`RetryCoordinator`], and posts an in-app notification whenever a user's
//! email had to be queued.

use std::sync::Arc;

use crate::core::fallback::{synthesize, EventKind, FallbackContext};
use crate::core::{
    DeliveryClient, NewNotification, NotificationRecord, NotificationStore, NotifyError,
    NotifyOutcome, ProcessReport, QueueStore, QueuedJob, Reservation, ReservationStatus,
    RetryCoordinator,
};
use crate::runtime::QueueTrigger;

/// Notifies users and administrators about reservation events.
pub struct ReservationNotifier<Q, D, N> {
    coordinator: Arc<RetryCoordinator<Q, D>>,
    notifications: N,
}

impl<Q, D, N> ReservationNotifier<Q, D, N> {
    /// Create a notifier from a coordinator and a notification store.
    pub fn new(coordinator: RetryCoordinator<Q, D>, notifications: N) -> Self {
        Self {
            coordinator: Arc::new(coordinator),
            notifications,
        }
    }

    /// Shared handle to the coordinator.
    pub const fn coordinator(&self) -> &Arc<RetryCoordinator<Q, D>> {
        &self.coordinator
    }

    /// Notification store used for in-app notifications.
    pub const fn notifications(&self) -> &N {
        &self.notifications
    }
}

impl<Q, D, N> ReservationNotifier<Q, D, N>
where
    Q: QueueStore + Send + 'static,
    D: DeliveryClient + 'static,
{
    /// Trigger that runs queue passes in the background.
    pub fn queue_trigger(&self) -> QueueTrigger<Q, D> {
        QueueTrigger::new(Arc::clone(&self.coordinator))
    }
}

impl<Q, D, N> ReservationNotifier<Q, D, N>
where
    Q: QueueStore + Send,
    D: DeliveryClient,
    N: NotificationStore,
{
    /// Email the requester about a status change.
    ///
    /// When the email has to be queued, the requester also gets an in-app
    /// notification (if the reservation carries a `user_id` and the status
    /// has a template).
    pub async fn notify_user_about_status_update(
        &self,
        reservation: Reservation,
        status: ReservationStatus,
        reason: Option<String>,
    ) -> NotifyOutcome {
        let job = match QueuedJob::user_status_update(reservation.clone(), status, reason.clone()) {
            Ok(job) => job,
            Err(err) => {
                tracing::error!(error = %err, "invalid parameters for user notification");
                return NotifyOutcome::Rejected(err.to_string());
            }
        };

        let outcome = self.coordinator.notify(job).await;
        if outcome.is_queued() {
            self.post_in_app_fallback(&reservation, status, reason.as_deref())
                .await;
        }
        outcome
    }

    /// Email administrators about a new reservation request.
    pub async fn notify_admin_about_new_request(
        &self,
        reservation_data: serde_json::Value,
    ) -> NotifyOutcome {
        match QueuedJob::admin_new_request(reservation_data) {
            Ok(job) => self.coordinator.notify(job).await,
            Err(err) => {
                tracing::error!(error = %err, "invalid admin notification request");
                NotifyOutcome::Rejected(err.to_string())
            }
        }
    }

    /// Run one retry pass over queued emails.
    pub async fn process_queue(&self) -> Result<ProcessReport, NotifyError> {
        self.coordinator.process_queue().await
    }

    /// In-app notifications of `user_id` about one reservation.
    pub async fn notifications_for_reservation(
        &self,
        user_id: &str,
        reservation_id: &str,
    ) -> Result<Vec<NotificationRecord>, NotifyError> {
        if reservation_id.trim().is_empty() {
            return Err(NotifyError::InvalidJob("reservation id is required".into()));
        }
        self.notifications
            .list_for_reservation(user_id, reservation_id)
            .await
    }

    async fn post_in_app_fallback(
        &self,
        reservation: &Reservation,
        status: ReservationStatus,
        reason: Option<&str>,
    ) {
        let Some(user_id) = reservation.user_id.as_deref() else {
            return;
        };
        let Some(event) = EventKind::from_status(status) else {
            return;
        };

        let record = synthesize(
            user_id,
            event,
            &FallbackContext::from_reservation(reservation, reason),
        );
        match self
            .notifications
            .create(NewNotification::from(record))
            .await
        {
            Ok(stored) => {
                tracing::info!(notification_id = %stored.id, %user_id, "posted in-app fallback notification");
            }
            Err(err) => {
                tracing::error!(error = %err, %user_id, "failed to create in-app notification");
            }
        }
    }
}
