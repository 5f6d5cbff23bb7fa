//! Queued notification jobs and the reservation context they carry.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::NotifyError;
use crate::util::clock::now;

/// Reservation as supplied by the dashboard.
///
/// Only `id` is required; every other field is context used to fill email
/// bodies and in-app messages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    /// Reservation identifier.
    pub id: String,
    /// Room or classroom name.
    #[serde(default, alias = "classroom", skip_serializing_if = "Option::is_none")]
    pub room: Option<String>,
    /// Reservation date as displayed to users.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// Time slot as displayed to users.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    /// Email address of the requester.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_email: Option<String>,
    /// Display name of the requester.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reserved_by: Option<String>,
    /// Account id of the requester, used for in-app notifications.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl Reservation {
    /// Create a reservation reference with only an id.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Set the room name.
    #[must_use]
    pub fn with_room(mut self, room: impl Into<String>) -> Self {
        self.room = Some(room.into());
        self
    }

    /// Set the display date.
    #[must_use]
    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    /// Set the time slot.
    #[must_use]
    pub fn with_time(mut self, time: impl Into<String>) -> Self {
        self.time = Some(time.into());
        self
    }

    /// Set the requester's email and display name.
    #[must_use]
    pub fn with_requester(mut self, email: impl Into<String>, name: impl Into<String>) -> Self {
        self.user_email = Some(email.into());
        self.reserved_by = Some(name.into());
        self
    }

    /// Set the requester's account id.
    #[must_use]
    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }
}

/// Reservation status as understood by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReservationStatus {
    /// Awaiting an administrator decision.
    Pending,
    /// Accepted by an administrator.
    Approved,
    /// Declined by an administrator.
    Rejected,
    /// Withdrawn by the requester or an administrator.
    Canceled,
}

impl ReservationStatus {
    /// Wire representation used in request bodies.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
            Self::Canceled => "CANCELED",
        }
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Discriminant of a queued job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JobKind {
    /// Email to a user about their reservation's new status.
    UserStatusUpdate,
    /// Email to administrators about a new reservation request.
    AdminNewRequest,
}

impl fmt::Display for JobKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UserStatusUpdate => f.write_str("user-status-update"),
            Self::AdminNewRequest => f.write_str("admin-new-request"),
        }
    }
}

/// Everything needed to retry a delivery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "kebab-case")]
pub enum JobPayload {
    /// Status change for a single reservation.
    UserStatusUpdate {
        /// Reservation the status applies to.
        reservation: Reservation,
        /// New status.
        status: ReservationStatus,
        /// Optional reason, typically given on rejection.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        reason: Option<String>,
    },
    /// New request awaiting review.
    AdminNewRequest {
        /// Opaque reservation request data forwarded to the backend.
        #[serde(rename = "reservationData")]
        reservation_data: serde_json::Value,
    },
}

impl JobPayload {
    /// Kind of job this payload belongs to.
    pub const fn kind(&self) -> JobKind {
        match self {
            Self::UserStatusUpdate { .. } => JobKind::UserStatusUpdate,
            Self::AdminNewRequest { .. } => JobKind::AdminNewRequest,
        }
    }

    /// Check that the payload carries the fields its delivery requires.
    pub fn validate(&self) -> Result<(), NotifyError> {
        match self {
            Self::UserStatusUpdate { reservation, .. } => {
                if reservation.id.trim().is_empty() {
                    return Err(NotifyError::InvalidJob("reservation id is required".into()));
                }
            }
            Self::AdminNewRequest { reservation_data } => {
                let empty = match reservation_data {
                    serde_json::Value::Null => true,
                    serde_json::Value::Object(map) => map.is_empty(),
                    _ => false,
                };
                if empty {
                    return Err(NotifyError::InvalidJob("reservation data is required".into()));
                }
            }
        }
        Ok(())
    }
}

/// A pending delivery awaiting retry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueuedJob {
    /// Job identifier for log correlation.
    pub id: Uuid,
    /// Data needed to retry the delivery, stored as top-level `type` and
    /// `data` fields.
    #[serde(flatten)]
    pub payload: JobPayload,
    /// When the job was first queued.
    pub enqueued_at: DateTime<Utc>,
    /// Redelivery attempts made by queue passes.
    pub attempts: u32,
}

impl QueuedJob {
    /// Build a job from a payload, rejecting payloads that can never be delivered.
    pub fn new(payload: JobPayload) -> Result<Self, NotifyError> {
        payload.validate()?;
        Ok(Self {
            id: Uuid::new_v4(),
            payload,
            enqueued_at: now(),
            attempts: 0,
        })
    }

    /// Job for a user-facing status email.
    pub fn user_status_update(
        reservation: Reservation,
        status: ReservationStatus,
        reason: Option<String>,
    ) -> Result<Self, NotifyError> {
        Self::new(JobPayload::UserStatusUpdate {
            reservation,
            status,
            reason,
        })
    }

    /// Job for an administrator new-request email.
    pub fn admin_new_request(reservation_data: serde_json::Value) -> Result<Self, NotifyError> {
        Self::new(JobPayload::AdminNewRequest { reservation_data })
    }

    /// Kind of this job.
    pub const fn kind(&self) -> JobKind {
        self.payload.kind()
    }
}
