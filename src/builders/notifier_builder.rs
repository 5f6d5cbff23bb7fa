//! Build a ready-to-use notifier from [`NotifierConfig`].

use std::path::Path;

use anyhow::{anyhow, Context};

use crate::config::{NotificationCacheConfig, NotifierConfig, QueueBackendConfig};
use crate::core::{
    AppResult, NotificationStore, NotifyError, QueueStore, ReservationNotifier, RetryCoordinator,
};
use crate::infra::{
    FileNotificationStore, FileQueueStore, HttpDeliveryClient, HttpNotificationStore,
    InMemoryNotificationStore, InMemoryQueueStore,
};

/// Queue store selected at runtime.
pub type DynQueueStore = Box<dyn QueueStore + Send>;
/// Local notification cache selected at runtime.
pub type DynNotificationStore = Box<dyn NotificationStore>;
/// Notifier produced by [`build_notifier`].
pub type ConfiguredNotifier =
    ReservationNotifier<DynQueueStore, HttpDeliveryClient, HttpNotificationStore<DynNotificationStore>>;

fn data_dir(cfg: &NotifierConfig) -> Result<&Path, NotifyError> {
    cfg.storage
        .data_dir
        .as_deref()
        .ok_or_else(|| NotifyError::Config("storage.data_dir is required for file backends".into()))
}

/// Queue store for the configured backend.
pub fn build_queue_store(cfg: &NotifierConfig) -> Result<DynQueueStore, NotifyError> {
    let store: DynQueueStore = match cfg.queue {
        QueueBackendConfig::InMemory => Box::new(InMemoryQueueStore::new()),
        QueueBackendConfig::File => {
            Box::new(FileQueueStore::new(data_dir(cfg)?, &cfg.storage.queue_key)?)
        }
    };
    Ok(store)
}

/// Local notification cache for the configured backend.
pub fn build_local_notifications(cfg: &NotifierConfig) -> Result<DynNotificationStore, NotifyError> {
    let store: DynNotificationStore = match cfg.notifications {
        NotificationCacheConfig::InMemory => Box::new(InMemoryNotificationStore::new()),
        NotificationCacheConfig::File => Box::new(FileNotificationStore::new(
            data_dir(cfg)?,
            &cfg.storage.notifications_key,
        )?),
    };
    Ok(store)
}

/// HTTP delivery client for the configured backend.
pub fn build_delivery_client(cfg: &NotifierConfig) -> Result<HttpDeliveryClient, NotifyError> {
    HttpDeliveryClient::new(cfg.api.clone())
}

/// Validate `cfg` and wire every component.
pub fn build_notifier(cfg: &NotifierConfig) -> AppResult<ConfiguredNotifier> {
    cfg.validate()
        .map_err(|e| anyhow!("config invalid: {e}"))?;

    let queue = build_queue_store(cfg).context("building queue store")?;
    let delivery = build_delivery_client(cfg).context("building delivery client")?;
    let local = build_local_notifications(cfg).context("building local notification cache")?;
    let notifications =
        HttpNotificationStore::new(&cfg.api, local).context("building notification store")?;

    tracing::info!(
        base_url = %cfg.api.base_url,
        queue = ?cfg.queue,
        notifications = ?cfg.notifications,
        max_attempts = cfg.retry.max_attempts,
        "notifier configured"
    );

    let coordinator = RetryCoordinator::with_max_attempts(queue, delivery, cfg.retry.max_attempts);
    Ok(ReservationNotifier::new(coordinator, notifications))
}
