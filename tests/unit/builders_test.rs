//! Tests for notifier builders

use reservation_notify::builders::{build_local_notifications, build_notifier, build_queue_store};
use reservation_notify::config::{
    ApiConfig, NotificationCacheConfig, NotifierConfig, QueueBackendConfig,
};
use reservation_notify::core::{
    NewNotification, NotificationStore, QueueStore, QueuedJob, Reservation, ReservationStatus,
};

fn config() -> NotifierConfig {
    NotifierConfig {
        api: ApiConfig::new("http://127.0.0.1:9"),
        ..NotifierConfig::default()
    }
}

#[test]
fn test_build_notifier_rejects_invalid_config() {
    let mut cfg = config();
    cfg.retry.max_attempts = 0;
    let err = build_notifier(&cfg).err().unwrap();
    assert!(err.to_string().contains("config invalid"));
}

#[tokio::test]
async fn test_build_notifier_applies_max_attempts() {
    let mut cfg = config();
    cfg.retry.max_attempts = 5;
    let notifier = build_notifier(&cfg).unwrap();
    assert_eq!(notifier.coordinator().max_attempts(), 5);
}

#[test]
fn test_build_file_queue_store() {
    let dir = tempfile::tempdir().unwrap();
    let mut cfg = config();
    cfg.queue = QueueBackendConfig::File;
    cfg.storage.data_dir = Some(dir.path().to_path_buf());

    let mut store = build_queue_store(&cfg).unwrap();
    let job = QueuedJob::user_status_update(
        Reservation::new("42"),
        ReservationStatus::Canceled,
        None,
    )
    .unwrap();
    store.enqueue(job).unwrap();

    assert!(dir.path().join("emailQueue.json").exists());
    assert_eq!(store.len(), 1);
}

#[test]
fn test_build_file_queue_store_requires_dir() {
    let mut cfg = config();
    cfg.queue = QueueBackendConfig::File;
    assert!(build_queue_store(&cfg).is_err());
}

#[tokio::test]
async fn test_build_file_notification_cache() {
    let dir = tempfile::tempdir().unwrap();
    let mut cfg = config();
    cfg.notifications = NotificationCacheConfig::File;
    cfg.storage.data_dir = Some(dir.path().to_path_buf());
    cfg.storage.notifications_key = "cache".into();

    let store = build_local_notifications(&cfg).unwrap();
    store
        .create(NewNotification::new("u-1", "Hello", "World"))
        .await
        .unwrap();

    assert!(dir.path().join("cache.json").exists());
    assert_eq!(store.list_for_user("u-1").await.unwrap().len(), 1);
}
