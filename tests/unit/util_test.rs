//! Tests for utility helpers

use reservation_notify::util::{init_tracing, now};

#[test]
fn test_now_is_monotonic_enough() {
    let first = now();
    let second = now();
    assert!(second >= first);
}

#[test]
fn test_init_tracing_is_idempotent() {
    init_tracing();
    init_tracing();
    tracing::info!("tracing initialized twice without panicking");
}
