//! Error types for the hearing assignment workflow.
//!
//! The slot finder and readable-ID generator are total and never fail;
//! these errors come from the collaborators around them.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors raised while assigning judges and hearings.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchedulingError {
    /// The roster has no judges to choose from.
    #[error("no judges available")]
    NoJudgesAvailable,

    /// Another booking already holds this judge's slot.
    #[error("slot {at} already booked for judge '{judge_id}'")]
    SlotTaken { judge_id: String, at: DateTime<Utc> },

    /// Every reservation attempt lost to a concurrent booking.
    #[error("gave up booking judge '{judge_id}' after {attempts} attempts")]
    RetriesExhausted { judge_id: String, attempts: u32 },

    /// The commitment store failed.
    #[error("commitment source failed: {0}")]
    Source(String),
}

impl SchedulingError {
    /// Returns true if retrying with fresh commitments may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, SchedulingError::SlotTaken { .. })
    }
}

/// Result alias for workflow operations.
pub type SchedulingResult<T> = Result<T, SchedulingError>;
