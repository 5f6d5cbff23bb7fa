//! # Reservation Notify
//!
//! Best-effort notification delivery for a room reservation system.
//!
//! When an administrator approves, rejects or cancels a reservation, the
//! requester should hear about it; when a new request comes in, the
//! administrators should. Emails go out through the reservation backend, which
//! is not always reachable. This crate makes those notifications durable:
//!
//! - **Two-tier delivery**: every send tries a primary endpoint, then one
//!   alternate endpoint.
//! - **Retry queue**: failed sends are persisted and retried by later queue
//!   passes, at most `max_attempts` times, in insertion order.
//! - **In-app fallback**: a user whose email was queued immediately gets an
//!   in-app notification instead.
//! - **Notification store**: server-backed, falling back to a local cache.
//!
//! Nothing here surfaces retry mechanics to end users: callers get a
//! [`NotifyOutcome`](core::NotifyOutcome) of `Delivered`, `Queued` or
//! `Rejected`.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use reservation_notify::builders::build_notifier;
//! use reservation_notify::config::NotifierConfig;
//! use reservation_notify::core::{Reservation, ReservationStatus};
//! use reservation_notify::runtime::TokioSpawner;
//!
//! let cfg = NotifierConfig::from_env()?;
//! let notifier = build_notifier(&cfg)?;
//!
//! let reservation = Reservation::new("42")
//!     .with_room("A101")
//!     .with_date("2024-05-02")
//!     .with_user_id("u-7");
//! let outcome = notifier
//!     .notify_user_about_status_update(reservation, ReservationStatus::Rejected, Some("Room unavailable".into()))
//!     .await;
//!
//! // On page load: retry whatever is still queued.
//! if let Some(spawner) = TokioSpawner::current() {
//!     notifier.queue_trigger().fire(&spawner);
//! }
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Core notification abstractions, retry coordination and fallback content.
pub mod core;
/// Configuration models for the notifier, its backends and the remote API.
pub mod config;
/// Builders to construct a notifier from configuration.
pub mod builders;
/// Infrastructure adapters for queue stores, notification stores and HTTP.
pub mod infra;
/// Runtime adapters and API surface.
pub mod runtime;
/// Shared utilities.
pub mod util;
