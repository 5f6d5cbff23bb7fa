//! Infrastructure adapters for queue stores, notification stores and HTTP.

pub mod http;
pub mod json_file;
pub mod queue;
pub mod store;

pub use http::{HttpDeliveryClient, HttpNotificationStore};
pub use queue::{FileQueueStore, InMemoryQueueStore};
pub use store::{FileNotificationStore, InMemoryNotificationStore};
