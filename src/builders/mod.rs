//! Builders that wire notifier components from configuration.

pub mod notifier_builder;

pub use notifier_builder::{
    build_delivery_client, build_local_notifications, build_notifier, build_queue_store,
    ConfiguredNotifier, DynNotificationStore, DynQueueStore,
};
