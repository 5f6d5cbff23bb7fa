//! HTTP adapters for the reservation backend.

pub mod client;
pub mod delivery;
pub mod notifications;

pub use client::{fill_path, path_segment, ApiClient};
pub use delivery::HttpDeliveryClient;
pub use notifications::HttpNotificationStore;
