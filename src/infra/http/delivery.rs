//! HTTP delivery client with a two-tier endpoint fallback.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::json;

use super::{fill_path, ApiClient};
use crate::config::ApiConfig;
use crate::core::{DeliveryClient, JobKind, NotifyError, Reservation, ReservationStatus};

/// Delivers notifications through the reservation backend.
///
/// Each delivery calls the primary endpoint and, if that fails, the alternate
/// endpoint once. Nothing is retried beyond that.
#[derive(Debug, Clone)]
pub struct HttpDeliveryClient {
    api: ApiClient,
    config: ApiConfig,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StatusEmail<'a> {
    reservation_id: &'a str,
    status: ReservationStatus,
    reason: &'a str,
    user_email: &'a str,
    room: &'a str,
    date: &'a str,
    time: &'a str,
    user_name: &'a str,
}

impl<'a> StatusEmail<'a> {
    fn new(reservation: &'a Reservation, status: ReservationStatus, reason: Option<&'a str>) -> Self {
        Self {
            reservation_id: &reservation.id,
            status,
            reason: reason.unwrap_or_default(),
            user_email: reservation.user_email.as_deref().unwrap_or_default(),
            room: reservation.room.as_deref().unwrap_or_default(),
            date: reservation.date.as_deref().unwrap_or_default(),
            time: reservation.time.as_deref().unwrap_or_default(),
            user_name: reservation.reserved_by.as_deref().unwrap_or_default(),
        }
    }
}

impl HttpDeliveryClient {
    /// Create a client for the configured backend.
    pub fn new(config: ApiConfig) -> Result<Self, NotifyError> {
        Ok(Self {
            api: ApiClient::new(&config)?,
            config,
        })
    }

    async fn two_tier<P, A>(
        &self,
        kind: JobKind,
        primary: (&str, &P),
        alternate: (&str, &A),
    ) -> Result<(), NotifyError>
    where
        P: Serialize + Sync + ?Sized,
        A: Serialize + Sync + ?Sized,
    {
        let primary_err = match self.api.post(primary.0, primary.1).await {
            Ok(_) => return Ok(()),
            Err(err) => err,
        };
        tracing::warn!(%kind, error = %primary_err, "primary endpoint failed, trying alternate");

        match self.api.post(alternate.0, alternate.1).await {
            Ok(_) => {
                tracing::info!(%kind, "delivered through alternate endpoint");
                Ok(())
            }
            Err(alternate_err) => Err(NotifyError::Delivery(format!(
                "primary: {primary_err}; alternate: {alternate_err}"
            ))),
        }
    }
}

#[async_trait]
impl DeliveryClient for HttpDeliveryClient {
    async fn deliver_user_status_update(
        &self,
        reservation: &Reservation,
        status: ReservationStatus,
        reason: Option<&str>,
    ) -> Result<(), NotifyError> {
        let email = StatusEmail::new(reservation, status, reason);
        let alternate_path = fill_path(&self.config.status_update_fallback_path, &reservation.id);
        let alternate_body = json!({ "status": status, "reason": reason });

        self.two_tier(
            JobKind::UserStatusUpdate,
            (self.config.status_update_path.as_str(), &email),
            (alternate_path.as_str(), &alternate_body),
        )
        .await
    }

    async fn deliver_admin_new_request(
        &self,
        reservation_data: &serde_json::Value,
    ) -> Result<(), NotifyError> {
        let body = json!({ "reservationData": reservation_data });
        self.two_tier(
            JobKind::AdminNewRequest,
            (self.config.new_request_path.as_str(), &body),
            (self.config.new_request_fallback_path.as_str(), &body),
        )
        .await
    }
}
