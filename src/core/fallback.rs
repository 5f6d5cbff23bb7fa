//! In-app notification content used when email delivery fails.
//!
//! This module only decides what the user sees; persisting the record is the
//! job of a [`NotificationStore`](crate::core::NotificationStore).

use crate::core::{NewNotification, NotificationRecord, Reservation, ReservationStatus};

const UNKNOWN_ROOM: &str = "the room";
const UNKNOWN_DATE: &str = "the scheduled date";

/// Reservation events that have an in-app template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Reservation approved.
    Approved,
    /// Reservation rejected, optionally with a reason.
    Rejected,
    /// Reservation canceled.
    Canceled,
}

impl EventKind {
    /// Map a status to its event. Pending reservations have no template.
    pub const fn from_status(status: ReservationStatus) -> Option<Self> {
        match status {
            ReservationStatus::Approved => Some(Self::Approved),
            ReservationStatus::Rejected => Some(Self::Rejected),
            ReservationStatus::Canceled => Some(Self::Canceled),
            ReservationStatus::Pending => None,
        }
    }

    const fn template(self) -> (&'static str, &'static str, &'static str, &'static str) {
        match self {
            Self::Approved => ("Reservation Approved", "approved", "fas fa-check-circle", "green"),
            Self::Rejected => ("Reservation Rejected", "rejected", "fas fa-times-circle", "red"),
            Self::Canceled => ("Reservation Canceled", "canceled", "fas fa-ban", "orange"),
        }
    }
}

/// Reservation details interpolated into the message.
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackContext<'a> {
    /// Room name.
    pub room: Option<&'a str>,
    /// Display date.
    pub date: Option<&'a str>,
    /// Rejection reason; ignored for other events.
    pub reason: Option<&'a str>,
}

impl<'a> FallbackContext<'a> {
    /// Context drawn from a reservation and an optional reason.
    pub fn from_reservation(reservation: &'a Reservation, reason: Option<&'a str>) -> Self {
        Self {
            room: reservation.room.as_deref(),
            date: reservation.date.as_deref(),
            reason,
        }
    }
}

/// Build the in-app notification for `event` addressed to `target_user_id`.
pub fn synthesize(
    target_user_id: &str,
    event: EventKind,
    context: &FallbackContext<'_>,
) -> NotificationRecord {
    let (title, verb, icon_class, icon_color) = event.template();
    let room = non_empty(context.room).unwrap_or(UNKNOWN_ROOM);
    let date = non_empty(context.date).unwrap_or(UNKNOWN_DATE);

    let mut message = format!("Your reservation for {room} on {date} has been {verb}.");
    if event == EventKind::Rejected {
        if let Some(reason) = non_empty(context.reason) {
            message.push_str(" Reason: ");
            message.push_str(reason);
        }
    }

    NotificationRecord::local(
        NewNotification::new(target_user_id, title, message).with_icon(icon_class, icon_color),
    )
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx<'a>(reason: Option<&'a str>) -> FallbackContext<'a> {
        FallbackContext {
            room: Some("A101"),
            date: Some("2024-05-02"),
            reason,
        }
    }

    #[test]
    fn test_rejected_includes_reason_verbatim() {
        let record = synthesize("u1", EventKind::Rejected, &ctx(Some("Room unavailable")));
        assert_eq!(record.title, "Reservation Rejected");
        assert!(record.message.contains("Room unavailable"));
        assert!(record.message.ends_with("Reason: Room unavailable"));
        assert_eq!(record.icon_color, "red");
        assert!(!record.read);
        assert!(record.is_local());
    }

    #[test]
    fn test_approved_ignores_reason() {
        let record = synthesize("u1", EventKind::Approved, &ctx(Some("Room unavailable")));
        assert_eq!(
            record.message,
            "Your reservation for A101 on 2024-05-02 has been approved."
        );
        assert!(!record.message.contains("Reason"));
        assert_eq!(record.icon_class, "fas fa-check-circle");
    }

    #[test]
    fn test_canceled_template() {
        let record = synthesize("u2", EventKind::Canceled, &ctx(None));
        assert_eq!(record.title, "Reservation Canceled");
        assert_eq!(record.icon_class, "fas fa-ban");
        assert_eq!(record.icon_color, "orange");
        assert_eq!(record.user_id, "u2");
    }

    #[test]
    fn test_blank_reason_is_omitted() {
        let record = synthesize("u1", EventKind::Rejected, &ctx(Some("   ")));
        assert!(!record.message.contains("Reason"));
    }

    #[test]
    fn test_missing_room_and_date_use_placeholders() {
        let record = synthesize("u1", EventKind::Approved, &FallbackContext::default());
        assert_eq!(
            record.message,
            "Your reservation for the room on the scheduled date has been approved."
        );
    }

    #[test]
    fn test_pending_has_no_event() {
        assert_eq!(EventKind::from_status(ReservationStatus::Pending), None);
        assert_eq!(
            EventKind::from_status(ReservationStatus::Rejected),
            Some(EventKind::Rejected)
        );
    }
}
