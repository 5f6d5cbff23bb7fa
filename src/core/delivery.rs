//! Delivery client abstraction.

use async_trait::async_trait;

use crate::core::{JobPayload, NotifyError, Reservation, ReservationStatus};

/// Performs one remote delivery of a notification.
///
/// Implementations may try an alternate endpoint before failing, but must not
/// retry beyond that; retries across time belong to the
/// [`RetryCoordinator`](crate::core::RetryCoordinator). Transport errors,
/// non-success statuses and malformed bodies all surface as a single `Err`.
#[async_trait]
pub trait DeliveryClient: Send + Sync {
    /// Ask the backend to email a user about a reservation status change.
    async fn deliver_user_status_update(
        &self,
        reservation: &Reservation,
        status: ReservationStatus,
        reason: Option<&str>,
    ) -> Result<(), NotifyError>;

    /// Ask the backend to email administrators about a new request.
    async fn deliver_admin_new_request(
        &self,
        reservation_data: &serde_json::Value,
    ) -> Result<(), NotifyError>;

    /// Deliver whichever operation `payload` describes.
    async fn deliver(&self, payload: &JobPayload) -> Result<(), NotifyError> {
        match payload {
            JobPayload::UserStatusUpdate {
                reservation,
                status,
                reason,
            } => {
                self.deliver_user_status_update(reservation, *status, reason.as_deref())
                    .await
            }
            JobPayload::AdminNewRequest { reservation_data } => {
                self.deliver_admin_new_request(reservation_data).await
            }
        }
    }
}
