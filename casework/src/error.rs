//! Error types for case deadline and escalation operations.
//!
//! Every fallible operation returns [`CaseworkError`] so callers can match
//! on the concrete failure and render exact messages instead of parsing
//! strings. Domain rejections carry the values that caused them.

use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::lifecycle::CaseStatus;

/// Result type alias for casework operations
pub type CaseworkResult<T> = Result<T, CaseworkError>;

/// Errors that can occur while managing case lifecycles and deadlines
#[derive(Error, Debug)]
pub enum CaseworkError {
    /// Requested status change is not an edge of the lifecycle graph
    #[error("Invalid transition from {from} to {to}")]
    InvalidTransition { from: CaseStatus, to: CaseStatus },

    /// Extension request is non-positive or would pass the statutory cap
    #[error(
        "Invalid extension: requested {requested_days} day(s) on top of {existing_days} existing, cap is {max_days}"
    )]
    InvalidExtension {
        requested_days: i64,
        existing_days: i64,
        max_days: i64,
    },

    /// Pause requested while the deadline clock is already paused
    #[error("Deadline clock for case {case_id} is already paused (since {paused_at})")]
    AlreadyPaused {
        case_id: Uuid,
        paused_at: DateTime<Utc>,
    },

    /// Resume requested while the deadline clock is running
    #[error("Deadline clock for case {case_id} is not paused")]
    NotPaused { case_id: Uuid },

    /// SLA configuration failed validation
    #[error("Invalid SLA configuration: {message}")]
    Config { message: String },

    /// A persistence or notification collaborator reported a failure
    #[error("Collaborator failure during {operation}: {message}")]
    Collaborator { operation: String, message: String },

    /// IO error wrapper
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parse error from config loading
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CaseworkError {
    /// Create an invalid transition error naming the attempted edge
    pub fn invalid_transition(from: CaseStatus, to: CaseStatus) -> Self {
        Self::InvalidTransition { from, to }
    }

    /// Create an invalid extension error carrying all three bounds
    pub fn invalid_extension(requested_days: i64, existing_days: i64, max_days: i64) -> Self {
        Self::InvalidExtension {
            requested_days,
            existing_days,
            max_days,
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a collaborator error, for sink and directory implementations
    pub fn collaborator(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Collaborator {
            operation: operation.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_transition_names_both_states() {
        let err = CaseworkError::invalid_transition(CaseStatus::Closed, CaseStatus::New);
        assert_eq!(err.to_string(), "Invalid transition from closed to new");
    }

    #[test]
    fn test_invalid_extension_carries_all_three_numbers() {
        let err = CaseworkError::invalid_extension(16, 45, 60);
        let message = err.to_string();
        assert!(message.contains("16"));
        assert!(message.contains("45"));
        assert!(message.contains("60"));
    }

    #[test]
    fn test_collaborator_error_names_operation() {
        let err = CaseworkError::collaborator("escalation_record", "connection reset");
        assert!(err.to_string().contains("escalation_record"));
        assert!(err.to_string().contains("connection reset"));
    }
}
