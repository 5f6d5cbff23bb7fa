//! Local notification stores.
//!
//! These keep in-app notifications on the client side, either as the only
//! store or as the cache behind
//! [`HttpNotificationStore`](crate::infra::http::HttpNotificationStore).

pub mod file;
pub mod memory;

pub use file::{FileNotificationStore, DEFAULT_NOTIFICATIONS_KEY};
pub use memory::InMemoryNotificationStore;

use crate::core::NotificationRecord;

fn mark_read_in(records: &mut [NotificationRecord], id: &str) -> Option<NotificationRecord> {
    let record = records.iter_mut().find(|n| n.id == id)?;
    record.read = true;
    Some(record.clone())
}

fn mark_all_read_in(records: &mut [NotificationRecord], user_id: &str) {
    records
        .iter_mut()
        .filter(|n| n.user_id == user_id)
        .for_each(|n| n.read = true);
}

fn for_user(records: &[NotificationRecord], user_id: &str) -> Vec<NotificationRecord> {
    records
        .iter()
        .filter(|n| n.user_id == user_id)
        .cloned()
        .collect()
}
