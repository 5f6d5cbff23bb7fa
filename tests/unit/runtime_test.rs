//! Tests for tokio spawner utilities and the queue trigger

use std::time::Duration;

use async_trait::async_trait;
use reservation_notify::core::{
    DeliveryClient, NotifyError, QueueStore, QueuedJob, Reservation, ReservationStatus,
    RetryCoordinator,
};
use reservation_notify::infra::InMemoryQueueStore;
use reservation_notify::runtime::{QueueTrigger, Spawn, TokioSpawner};

struct AlwaysOk;

#[async_trait]
impl DeliveryClient for AlwaysOk {
    async fn deliver_user_status_update(
        &self,
        _reservation: &Reservation,
        _status: ReservationStatus,
        _reason: Option<&str>,
    ) -> Result<(), NotifyError> {
        Ok(())
    }

    async fn deliver_admin_new_request(
        &self,
        _reservation_data: &serde_json::Value,
    ) -> Result<(), NotifyError> {
        Ok(())
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_tokio_spawner_spawn() {
    let spawner = TokioSpawner::new(tokio::runtime::Handle::current());

    let (tx, rx) = tokio::sync::oneshot::channel();
    spawner.spawn(async move {
        tx.send(123).unwrap();
    });

    let result = rx.await.expect("oneshot result");
    assert_eq!(result, 123);
}

#[test]
fn test_tokio_spawner_current_outside_runtime() {
    assert!(TokioSpawner::current().is_none());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_queue_trigger_drains_queue() {
    let mut store = InMemoryQueueStore::new();
    for id in ["1", "2"] {
        let job = QueuedJob::user_status_update(
            Reservation::new(id),
            ReservationStatus::Approved,
            None,
        )
        .unwrap();
        store.enqueue(job).unwrap();
    }
    let coordinator = std::sync::Arc::new(RetryCoordinator::new(store, AlwaysOk));
    let trigger = QueueTrigger::new(std::sync::Arc::clone(&coordinator));
    let spawner = TokioSpawner::current().expect("inside runtime");

    trigger.fire(&spawner);
    trigger.clone().fire(&spawner);

    let mut drained = false;
    for _ in 0..50 {
        if coordinator.pending().await.is_empty() {
            drained = true;
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert!(drained);
    assert!(!coordinator.is_processing());
}
