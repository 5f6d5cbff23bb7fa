//! Core notification abstractions, retry coordination and fallback content.

pub mod coordinator;
pub mod delivery;
pub mod error;
pub mod fallback;
pub mod job;
pub mod notification;
pub mod notifier;
pub mod queue;

pub use coordinator::{NotifyOutcome, ProcessReport, RetryCoordinator, DEFAULT_MAX_ATTEMPTS};
pub use delivery::DeliveryClient;
pub use error::{AppResult, NotifyError};
pub use fallback::{synthesize, EventKind, FallbackContext};
pub use job::{JobKind, JobPayload, QueuedJob, Reservation, ReservationStatus};
pub use notification::{
    filter_for_reservation, NewNotification, NotificationRecord, NotificationStore,
};
pub use notifier::ReservationNotifier;
pub use queue::QueueStore;
