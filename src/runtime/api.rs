//! API-facing response models for the dashboard.

use serde::{Deserialize, Serialize};

use crate::core::{JobKind, NotifyOutcome, ProcessReport};

/// Result of a notify call as returned to the UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotifyResponse {
    /// Delivered immediately.
    pub delivered: bool,
    /// Waiting in the retry queue.
    pub queued: bool,
    /// Human-readable summary.
    pub message: String,
}

impl NotifyResponse {
    /// Summarize `outcome` for a job of `kind`.
    pub fn from_outcome(kind: JobKind, outcome: &NotifyOutcome) -> Self {
        let subject = match kind {
            JobKind::UserStatusUpdate => "Email",
            JobKind::AdminNewRequest => "Admin notification",
        };
        match outcome {
            NotifyOutcome::Delivered => Self {
                delivered: true,
                queued: false,
                message: format!("{subject} sent"),
            },
            NotifyOutcome::Queued => Self {
                delivered: false,
                queued: true,
                message: format!("{subject} queued for later sending"),
            },
            NotifyOutcome::Rejected(reason) => Self {
                delivered: false,
                queued: false,
                message: format!("{subject} not sent: {reason}"),
            },
        }
    }
}

/// Result of a queue pass as returned to the UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueProcessingResponse {
    /// Delivered during the pass.
    pub success: usize,
    /// Failed during the pass.
    pub failed: usize,
    /// Still queued.
    pub remaining: usize,
    /// Error message when the pass could not run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl QueueProcessingResponse {
    /// Convert a pass result; errors become a zeroed response with a message.
    pub fn from_result<E: std::fmt::Display>(result: &Result<ProcessReport, E>) -> Self {
        match result {
            Ok(report) => Self {
                success: report.succeeded,
                failed: report.failed,
                remaining: report.remaining,
                error: None,
            },
            Err(err) => Self {
                success: 0,
                failed: 0,
                remaining: 0,
                error: Some(err.to_string()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::NotifyError;

    #[test]
    fn test_queued_response() {
        let resp = NotifyResponse::from_outcome(JobKind::UserStatusUpdate, &NotifyOutcome::Queued);
        assert!(resp.queued);
        assert!(!resp.delivered);
        assert_eq!(resp.message, "Email queued for later sending");
    }

    #[test]
    fn test_rejected_response_carries_reason() {
        let resp = NotifyResponse::from_outcome(
            JobKind::AdminNewRequest,
            &NotifyOutcome::Rejected("invalid job: reservation data is required".into()),
        );
        assert!(!resp.queued);
        assert!(resp.message.contains("reservation data is required"));
    }

    #[test]
    fn test_processing_error_response() {
        let result: Result<ProcessReport, NotifyError> = Err(NotifyError::ProcessingInFlight);
        let resp = QueueProcessingResponse::from_result(&result);
        assert_eq!(resp.success, 0);
        assert_eq!(resp.error.as_deref(), Some("queue processing already in flight"));
        let json = serde_json::to_value(QueueProcessingResponse::from_result::<NotifyError>(&Ok(
            ProcessReport {
                succeeded: 2,
                failed: 1,
                remaining: 1,
                exhausted: 0,
            },
        )))
        .unwrap();
        assert_eq!(json, serde_json::json!({"success": 2, "failed": 1, "remaining": 1}));
    }
}
