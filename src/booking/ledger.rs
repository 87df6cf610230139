//! Commitment storage seam and in-memory ledger.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;

use crate::error::{SchedulingError, SchedulingResult};
use crate::models::Commitment;

/// Query capability over a judge's existing hearings.
pub trait CommitmentSource: Send + Sync {
    /// Hearing instants of `judge_id` at or after `now`, in any order.
    fn list_future_commitments(
        &self,
        judge_id: &str,
        now: DateTime<Utc>,
    ) -> SchedulingResult<Vec<DateTime<Utc>>>;
}

/// A commitment source that can also persist new hearings.
pub trait HearingLedger: CommitmentSource {
    /// Books `case_id` with `judge_id` at `at`.
    ///
    /// Must fail with [`SchedulingError::SlotTaken`] if the judge already
    /// has a hearing with the same [`slot_key`] for `window_ms`.
    fn reserve(
        &self,
        judge_id: &str,
        case_id: &str,
        at: DateTime<Utc>,
        window_ms: i64,
    ) -> SchedulingResult<()>;

    /// Books a fallback hearing. Fallbacks share one instant per day, so
    /// no uniqueness is enforced.
    fn reserve_fallback(
        &self,
        judge_id: &str,
        case_id: &str,
        at: DateTime<Utc>,
    ) -> SchedulingResult<()>;
}

/// Uniqueness key of a hearing: its instant rounded to the nearest
/// multiple of `window_ms`.
///
/// Two instants at least `window_ms` apart never share a key, so a slot
/// found with the same conflict window never collides on its own.
pub fn slot_key(at: DateTime<Utc>, window_ms: i64) -> i64 {
    let window = window_ms.max(1);
    (at.timestamp_millis() + window / 2).div_euclid(window)
}

/// Ledger held in memory, keyed by judge.
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    by_judge: RwLock<HashMap<String, Vec<Commitment>>>,
}

impl InMemoryLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a ledger pre-loaded with commitments, bypassing the
    /// uniqueness check.
    pub fn with_commitments(commitments: impl IntoIterator<Item = Commitment>) -> Self {
        let mut by_judge: HashMap<String, Vec<Commitment>> = HashMap::new();
        for c in commitments {
            by_judge.entry(c.judge_id.clone()).or_default().push(c);
        }
        Self {
            by_judge: RwLock::new(by_judge),
        }
    }

    /// All commitments of a judge, past and future.
    pub fn commitments_for(&self, judge_id: &str) -> Vec<Commitment> {
        self.by_judge
            .read()
            .get(judge_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Total number of booked hearings.
    pub fn len(&self) -> usize {
        self.by_judge.read().values().map(Vec::len).sum()
    }

    /// Whether no hearings are booked.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CommitmentSource for InMemoryLedger {
    fn list_future_commitments(
        &self,
        judge_id: &str,
        now: DateTime<Utc>,
    ) -> SchedulingResult<Vec<DateTime<Utc>>> {
        Ok(self
            .by_judge
            .read()
            .get(judge_id)
            .map(|cs| cs.iter().filter(|c| c.at >= now).map(|c| c.at).collect())
            .unwrap_or_default())
    }
}

impl HearingLedger for InMemoryLedger {
    fn reserve(
        &self,
        judge_id: &str,
        case_id: &str,
        at: DateTime<Utc>,
        window_ms: i64,
    ) -> SchedulingResult<()> {
        let mut by_judge = self.by_judge.write();
        let booked = by_judge.entry(judge_id.to_string()).or_default();
        let key = slot_key(at, window_ms);
        if booked.iter().any(|c| slot_key(c.at, window_ms) == key) {
            return Err(SchedulingError::SlotTaken {
                judge_id: judge_id.to_string(),
                at,
            });
        }
        booked.push(Commitment::new(judge_id, case_id, at));
        Ok(())
    }

    fn reserve_fallback(
        &self,
        judge_id: &str,
        case_id: &str,
        at: DateTime<Utc>,
    ) -> SchedulingResult<()> {
        self.by_judge
            .write()
            .entry(judge_id.to_string())
            .or_default()
            .push(Commitment::new(judge_id, case_id, at));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const HOUR: i64 = 3_600_000;

    fn utc(d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, d, h, mi, 0).unwrap()
    }

    #[test]
    fn test_slot_key_rounds_to_nearest_window() {
        assert_eq!(slot_key(utc(2, 9, 52), HOUR), slot_key(utc(2, 10, 0), HOUR));
        assert_eq!(slot_key(utc(2, 10, 10), HOUR), slot_key(utc(2, 10, 0), HOUR));
        assert_ne!(slot_key(utc(2, 10, 31), HOUR), slot_key(utc(2, 10, 0), HOUR));
    }

    #[test]
    fn test_slot_key_follows_short_window() {
        let half = HOUR / 2;
        assert_ne!(slot_key(utc(2, 10, 30), half), slot_key(utc(2, 11, 0), half));
        assert_ne!(slot_key(utc(2, 10, 0), half), slot_key(utc(2, 10, 30), half));
        assert_eq!(slot_key(utc(2, 10, 40), half), slot_key(utc(2, 10, 30), half));
    }

    #[test]
    fn test_reserve_rejects_same_slot() {
        let ledger = InMemoryLedger::new();
        ledger.reserve("J1", "C1", utc(2, 10, 4), HOUR).unwrap();
        let err = ledger.reserve("J1", "C2", utc(2, 9, 57), HOUR).unwrap_err();
        assert!(err.is_retryable());
        // Other judges are independent
        ledger.reserve("J2", "C3", utc(2, 10, 0), HOUR).unwrap();
        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn test_fallback_may_share_instant() {
        let ledger = InMemoryLedger::new();
        ledger.reserve_fallback("J1", "C1", utc(18, 11, 0)).unwrap();
        ledger.reserve_fallback("J1", "C2", utc(18, 11, 0)).unwrap();
        assert_eq!(ledger.commitments_for("J1").len(), 2);
    }

    #[test]
    fn test_future_commitments_only() {
        let ledger = InMemoryLedger::with_commitments(vec![
            Commitment::new("J1", "C1", utc(1, 10, 0)),
            Commitment::new("J1", "C2", utc(5, 10, 0)),
            Commitment::new("J2", "C3", utc(5, 11, 0)),
        ]);
        let future = ledger.list_future_commitments("J1", utc(3, 0, 0)).unwrap();
        assert_eq!(future, vec![utc(5, 10, 0)]);
        assert!(ledger.list_future_commitments("J9", utc(3, 0, 0)).unwrap().is_empty());
        assert_eq!(ledger.commitments_for("J1").len(), 2);
    }
}
