//! Record status transitions.
//!
//! The medical team may move a record between any two statuses:
//! InProgress <-> Completed <-> AwaitingDoctor. Re-applying the current
//! status is rejected.

use crate::error::RecordsError;
use crate::types::RecordStatus;

/// Whether `from -> to` is an allowed status change.
pub fn can_transition(from: RecordStatus, to: RecordStatus) -> bool {
    from != to
}

/// Validate that a status change is allowed.
pub fn validate_transition(from: RecordStatus, to: RecordStatus) -> Result<(), RecordsError> {
    if can_transition(from, to) {
        Ok(())
    } else {
        Err(RecordsError::InvalidStatusTransition(from, to))
    }
}
