//! Queue store backends.

pub mod file;
pub mod memory;

pub use file::{FileQueueStore, DEFAULT_QUEUE_KEY};
pub use memory::InMemoryQueueStore;
