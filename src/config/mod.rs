//! Configuration models for the notifier, its backends and the remote API.

pub mod notifier;

pub use notifier::{
    ApiConfig, NotificationCacheConfig, NotifierConfig, QueueBackendConfig, RetryConfig,
    StorageConfig,
};
