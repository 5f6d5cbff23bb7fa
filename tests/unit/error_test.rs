//! Tests for error types

use reservation_notify::core::{AppResult, NotifyError};

#[test]
fn test_error_display() {
    assert_eq!(
        NotifyError::InvalidJob("reservation id is required".into()).to_string(),
        "invalid job: reservation id is required"
    );
    assert_eq!(
        NotifyError::Remote {
            status: 502,
            body: "bad gateway".into()
        }
        .to_string(),
        "remote returned 502: bad gateway"
    );
    assert_eq!(
        NotifyError::ProcessingInFlight.to_string(),
        "queue processing already in flight"
    );
    assert_eq!(
        NotifyError::Storage("disk full".into()).to_string(),
        "storage error: disk full"
    );
}

#[test]
fn test_app_result_wraps_notify_error() {
    fn load() -> AppResult<()> {
        Err(NotifyError::Config("missing base url".into()).into())
    }

    let err = load().unwrap_err();
    assert!(err.downcast_ref::<NotifyError>().is_some());
    assert_eq!(err.to_string(), "config error: missing base url");
}
