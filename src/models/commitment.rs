//! Hearing commitment model.
//!
//! A commitment is a hearing instant already bound to a judge. The
//! scheduler only reads commitments; persistence belongs to the caller.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An existing hearing bound to a judge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commitment {
    /// Judge holding the hearing.
    pub judge_id: String,
    /// Case heard at this instant.
    pub case_id: String,
    /// Hearing instant.
    pub at: DateTime<Utc>,
}

impl Commitment {
    /// Creates a new commitment.
    pub fn new(judge_id: impl Into<String>, case_id: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self {
            judge_id: judge_id.into(),
            case_id: case_id.into(),
            at,
        }
    }

    /// Whether `candidate` is closer than `window_ms` to this hearing.
    #[inline]
    pub fn conflicts_with(&self, candidate: DateTime<Utc>, window_ms: i64) -> bool {
        within_window(self.at, candidate, window_ms)
    }
}

/// Two instants conflict iff `|a - b| < window_ms`.
#[inline]
pub fn within_window(a: DateTime<Utc>, b: DateTime<Utc>, window_ms: i64) -> bool {
    (a - b).num_milliseconds().abs() < window_ms
}

/// Hearing instants of one judge, in input order.
pub fn instants_for_judge(commitments: &[Commitment], judge_id: &str) -> Vec<DateTime<Utc>> {
    commitments
        .iter()
        .filter(|c| c.judge_id == judge_id)
        .map(|c| c.at)
        .collect()
}
