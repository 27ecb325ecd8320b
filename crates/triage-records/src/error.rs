//! Error types for triage records and reports.

use triage_core::TriageError;
use uuid::Uuid;

use crate::types::RecordStatus;

/// Errors from the record store, status updates and report generation.
#[derive(Debug, thiserror::Error)]
pub enum RecordsError {
    #[error("Triage record not found: {0}")]
    NotFound(Uuid),
    #[error("Invalid status transition: {0} -> {1}")]
    InvalidStatusTransition(RecordStatus, RecordStatus),
    #[error("Unknown time range: {0}")]
    UnknownTimeRange(String),
    #[error("Session {0} has not reached the summary")]
    IncompleteSession(Uuid),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for RecordsError {
    fn from(err: serde_json::Error) -> Self {
        RecordsError::Storage(err.to_string())
    }
}

impl From<RecordsError> for TriageError {
    fn from(err: RecordsError) -> Self {
        match err {
            RecordsError::NotFound(id) => TriageError::NotFound(format!("triage record {}", id)),
            RecordsError::Io(e) => TriageError::Io(e),
            RecordsError::UnknownTimeRange(range) => {
                TriageError::InvalidInput(format!("unknown time range '{}'", range))
            }
            other => TriageError::Records(other.to_string()),
        }
    }
}

/// A specialized `Result` type for record operations.
pub type Result<T> = std::result::Result<T, RecordsError>;
