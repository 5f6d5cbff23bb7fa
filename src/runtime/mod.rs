//! Runtime adapters and the API-facing surface.

pub mod api;
pub mod tokio_spawner;
pub mod trigger;

pub use api::{NotifyResponse, QueueProcessingResponse};
pub use tokio_spawner::{Spawn, TokioSpawner};
pub use trigger::QueueTrigger;
