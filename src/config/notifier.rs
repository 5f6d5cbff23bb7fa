//! Notifier configuration structures.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::{NotifyError, DEFAULT_MAX_ATTEMPTS};
use crate::infra::queue::DEFAULT_QUEUE_KEY;
use crate::infra::store::DEFAULT_NOTIFICATIONS_KEY;

/// Queue backend selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueueBackendConfig {
    /// In-memory queue for development/testing.
    #[default]
    InMemory,
    /// JSON file under `storage.data_dir`.
    File,
}

/// Local notification cache selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationCacheConfig {
    /// In-memory cache.
    #[default]
    InMemory,
    /// JSON file under `storage.data_dir`.
    File,
}

/// Remote API endpoints. Paths are relative to `base_url`; `{id}` is replaced
/// with the reservation id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Backend origin, e.g. `https://rooms.example.edu`.
    pub base_url: String,
    /// Primary status-update endpoint.
    pub status_update_path: String,
    /// Alternate status-update endpoint.
    pub status_update_fallback_path: String,
    /// Primary new-request endpoint.
    pub new_request_path: String,
    /// Alternate new-request endpoint.
    pub new_request_fallback_path: String,
    /// Per-request timeout; `None` waits indefinitely.
    pub request_timeout_secs: Option<u64>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            status_update_path: "/api/notifications/reservation-status".into(),
            status_update_fallback_path: "/api/email/reservation-status/{id}".into(),
            new_request_path: "/api/notifications/new-reservation".into(),
            new_request_fallback_path: "/api/email/new-reservation".into(),
            request_timeout_secs: Some(30),
        }
    }
}

impl ApiConfig {
    /// Configuration with default paths for `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Request timeout as a duration.
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// Validate endpoint values.
    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.trim().is_empty() {
            return Err("base_url must not be empty".into());
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(format!("base_url `{}` must be http(s)", self.base_url));
        }
        for (name, path) in [
            ("status_update_path", &self.status_update_path),
            ("status_update_fallback_path", &self.status_update_fallback_path),
            ("new_request_path", &self.new_request_path),
            ("new_request_fallback_path", &self.new_request_fallback_path),
        ] {
            if !path.starts_with('/') {
                return Err(format!("{name} must start with `/`"));
            }
        }
        if self.request_timeout_secs == Some(0) {
            return Err("request_timeout_secs must be greater than 0".into());
        }
        Ok(())
    }
}

/// Retry policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Queue passes a job may take before it is dropped.
    pub max_attempts: u32,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

/// Where file backends keep their data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory for file backends.
    pub data_dir: Option<PathBuf>,
    /// Storage key of the email queue.
    pub queue_key: String,
    /// Storage key of the local notification cache.
    pub notifications_key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            queue_key: DEFAULT_QUEUE_KEY.into(),
            notifications_key: DEFAULT_NOTIFICATIONS_KEY.into(),
        }
    }
}

/// Root notifier configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotifierConfig {
    /// Remote API settings.
    pub api: ApiConfig,
    /// Retry policy.
    #[serde(default)]
    pub retry: RetryConfig,
    /// Queue backend.
    #[serde(default)]
    pub queue: QueueBackendConfig,
    /// Local notification cache backend.
    #[serde(default)]
    pub notifications: NotificationCacheConfig,
    /// File storage settings.
    #[serde(default)]
    pub storage: StorageConfig,
}

impl NotifierConfig {
    /// Validate all sections.
    pub fn validate(&self) -> Result<(), String> {
        self.api.validate().map_err(|e| format!("api invalid: {e}"))?;
        if self.retry.max_attempts == 0 {
            return Err("max_attempts must be greater than 0".into());
        }
        let needs_dir = self.queue == QueueBackendConfig::File
            || self.notifications == NotificationCacheConfig::File;
        if needs_dir && self.storage.data_dir.is_none() {
            return Err("file backends require storage.data_dir".into());
        }
        for (name, key) in [
            ("queue_key", &self.storage.queue_key),
            ("notifications_key", &self.storage.notifications_key),
        ] {
            if key.is_empty() || key.contains(['/', '\\']) {
                return Err(format!("{name} `{key}` is not a valid storage key"));
            }
        }
        Ok(())
    }

    /// Parse configuration from a JSON string and validate.
    pub fn from_json_str(input: &str) -> Result<Self, NotifyError> {
        let cfg: Self = serde_json::from_str(input)
            .map_err(|e| NotifyError::Config(format!("parse error: {e}")))?;
        cfg.validate().map_err(NotifyError::Config)?;
        Ok(cfg)
    }

    /// Load configuration from the process environment, reading `.env` first.
    ///
    /// See [`NotifierConfig::from_lookup`] for the variables consulted.
    pub fn from_env() -> Result<Self, NotifyError> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!(path = %path.display(), "loaded .env");
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from `NOTIFY_*` variables resolved by `lookup`.
    ///
    /// - `NOTIFY_API_BASE_URL` (required)
    /// - `NOTIFY_MAX_ATTEMPTS`
    /// - `NOTIFY_REQUEST_TIMEOUT_SECS` (`0` disables the timeout)
    /// - `NOTIFY_DATA_DIR` (switches both backends to files)
    /// - `NOTIFY_QUEUE_KEY`, `NOTIFY_NOTIFICATIONS_KEY`
    pub fn from_lookup<F>(lookup: F) -> Result<Self, NotifyError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup("NOTIFY_API_BASE_URL")
            .ok_or_else(|| NotifyError::Config("NOTIFY_API_BASE_URL is not set".into()))?;
        let mut cfg = Self {
            api: ApiConfig::new(base_url),
            ..Self::default()
        };

        if let Some(raw) = lookup("NOTIFY_MAX_ATTEMPTS") {
            cfg.retry.max_attempts = parse_var("NOTIFY_MAX_ATTEMPTS", &raw)?;
        }
        if let Some(raw) = lookup("NOTIFY_REQUEST_TIMEOUT_SECS") {
            let secs: u64 = parse_var("NOTIFY_REQUEST_TIMEOUT_SECS", &raw)?;
            cfg.api.request_timeout_secs = (secs > 0).then_some(secs);
        }
        if let Some(dir) = lookup("NOTIFY_DATA_DIR") {
            cfg.storage.data_dir = Some(PathBuf::from(dir));
            cfg.queue = QueueBackendConfig::File;
            cfg.notifications = NotificationCacheConfig::File;
        }
        if let Some(key) = lookup("NOTIFY_QUEUE_KEY") {
            cfg.storage.queue_key = key;
        }
        if let Some(key) = lookup("NOTIFY_NOTIFICATIONS_KEY") {
            cfg.storage.notifications_key = key;
        }

        cfg.validate().map_err(NotifyError::Config)?;
        Ok(cfg)
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, raw: &str) -> Result<T, NotifyError> {
    raw.trim()
        .parse()
        .map_err(|_| NotifyError::Config(format!("{name} has invalid value `{raw}`")))
}
