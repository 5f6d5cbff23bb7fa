//! Tests for configuration validation

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use reservation_notify::config::{
    ApiConfig, NotificationCacheConfig, NotifierConfig, QueueBackendConfig,
};
use reservation_notify::core::NotifyError;

fn valid() -> NotifierConfig {
    NotifierConfig {
        api: ApiConfig::new("https://rooms.example.edu"),
        ..NotifierConfig::default()
    }
}

fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();
    move |key| vars.get(key).cloned()
}

#[test]
fn test_notifier_config_validation() {
    let cfg = valid();
    assert!(cfg.validate().is_ok());
    assert_eq!(cfg.retry.max_attempts, 3);
    assert_eq!(cfg.api.request_timeout(), Some(Duration::from_secs(30)));
}

#[test]
fn test_notifier_config_invalid_max_attempts() {
    let mut cfg = valid();
    cfg.retry.max_attempts = 0;
    assert!(cfg.validate().is_err());
}

#[test]
fn test_api_config_invalid_base_url() {
    assert!(ApiConfig::new("").validate().is_err());
    assert!(ApiConfig::new("ftp://rooms.example.edu").validate().is_err());
}

#[test]
fn test_api_config_invalid_path() {
    let mut api = ApiConfig::new("http://localhost:3000");
    api.new_request_fallback_path = "api/email/new-reservation".into();
    let err = api.validate().unwrap_err();
    assert!(err.contains("new_request_fallback_path"));
}

#[test]
fn test_api_config_invalid_timeout() {
    let mut api = ApiConfig::new("http://localhost:3000");
    api.request_timeout_secs = Some(0);
    assert!(api.validate().is_err());
    api.request_timeout_secs = None;
    assert!(api.validate().is_ok());
    assert_eq!(api.request_timeout(), None);
}

#[test]
fn test_file_backend_requires_data_dir() {
    let mut cfg = valid();
    cfg.queue = QueueBackendConfig::File;
    assert!(cfg.validate().is_err());

    cfg.storage.data_dir = Some(PathBuf::from("/var/lib/reservations"));
    assert!(cfg.validate().is_ok());
}

#[test]
fn test_storage_key_rejects_separators() {
    let mut cfg = valid();
    cfg.storage.queue_key = "../emailQueue".into();
    assert!(cfg.validate().is_err());
}

#[test]
fn test_from_json_str_applies_defaults() {
    let cfg = NotifierConfig::from_json_str(
        r#"{
            "api": { "base_url": "http://localhost:3000" },
            "retry": { "max_attempts": 5 },
            "queue": "file",
            "storage": { "data_dir": "/tmp/notify" }
        }"#,
    )
    .unwrap();

    assert_eq!(cfg.retry.max_attempts, 5);
    assert_eq!(cfg.queue, QueueBackendConfig::File);
    assert_eq!(cfg.notifications, NotificationCacheConfig::InMemory);
    assert_eq!(cfg.storage.queue_key, "emailQueue");
    assert_eq!(cfg.api.status_update_path, "/api/notifications/reservation-status");
}

#[test]
fn test_from_json_str_rejects_invalid() {
    let err = NotifierConfig::from_json_str(r#"{ "api": { "base_url": "" } }"#).unwrap_err();
    assert!(matches!(err, NotifyError::Config(_)));

    let err = NotifierConfig::from_json_str("not json").unwrap_err();
    assert!(err.to_string().contains("parse error"));
}

#[test]
fn test_from_lookup_reads_variables() {
    let cfg = NotifierConfig::from_lookup(lookup(&[
        ("NOTIFY_API_BASE_URL", "https://rooms.example.edu"),
        ("NOTIFY_MAX_ATTEMPTS", " 4 "),
        ("NOTIFY_REQUEST_TIMEOUT_SECS", "0"),
        ("NOTIFY_DATA_DIR", "/srv/notify"),
        ("NOTIFY_QUEUE_KEY", "retryQueue"),
    ]))
    .unwrap();

    assert_eq!(cfg.retry.max_attempts, 4);
    assert_eq!(cfg.api.request_timeout_secs, None);
    assert_eq!(cfg.queue, QueueBackendConfig::File);
    assert_eq!(cfg.notifications, NotificationCacheConfig::File);
    assert_eq!(cfg.storage.data_dir, Some(PathBuf::from("/srv/notify")));
    assert_eq!(cfg.storage.queue_key, "retryQueue");
    assert_eq!(cfg.storage.notifications_key, "userNotifications");
}

#[test]
fn test_from_lookup_requires_base_url() {
    let err = NotifierConfig::from_lookup(lookup(&[])).unwrap_err();
    assert!(err.to_string().contains("NOTIFY_API_BASE_URL"));
}

#[test]
fn test_from_lookup_rejects_bad_numbers() {
    let err = NotifierConfig::from_lookup(lookup(&[
        ("NOTIFY_API_BASE_URL", "http://localhost:3000"),
        ("NOTIFY_MAX_ATTEMPTS", "three"),
    ]))
    .unwrap_err();
    assert!(err.to_string().contains("NOTIFY_MAX_ATTEMPTS"));

    let err = NotifierConfig::from_lookup(lookup(&[
        ("NOTIFY_API_BASE_URL", "http://localhost:3000"),
        ("NOTIFY_MAX_ATTEMPTS", "0"),
    ]))
    .unwrap_err();
    assert!(matches!(err, NotifyError::Config(_)));
}
