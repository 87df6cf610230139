//! Serialized read-find-persist hearing assignment.
//!
//! # Algorithm
//!
//! 1. Take the judge's lock (one mutex per judge ID; other judges proceed
//!    in parallel).
//! 2. Read the judge's future commitments from the ledger.
//! 3. Run the slot finder on that snapshot.
//! 4. Reserve the slot. If the ledger reports it taken (a writer outside
//!    this process got there first), go back to 2, up to `max_attempts`.
//!
//! Fallback slots skip the uniqueness check (every overbooked case that
//! day shares the same instant) and are logged at `warn` so overload is
//! visible while booking keeps its always-succeeds contract.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info, warn};

use super::HearingLedger;
use crate::error::{SchedulingError, SchedulingResult};
use crate::scheduler::{Clock, SlotFinder, SlotOutcome};

/// Default number of reservation attempts per assignment.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Books hearings on a ledger, one judge at a time.
///
/// # Example
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use docket_schedule::booking::{HearingAssigner, InMemoryLedger};
/// use docket_schedule::scheduler::{FixedClock, Jitter, SlotFinder, SlotFinderConfig};
///
/// let now = Utc.with_ymd_and_hms(2025, 6, 4, 9, 0, 0).unwrap();
/// let finder = SlotFinder::new(SlotFinderConfig::new().with_jitter(Jitter::None));
/// let assigner = HearingAssigner::new(finder, InMemoryLedger::new(), FixedClock(now));
///
/// let first = assigner.assign("J1", "C1").unwrap();
/// let second = assigner.assign("J1", "C2").unwrap();
/// assert_eq!(first.at, Utc.with_ymd_and_hms(2025, 6, 5, 10, 0, 0).unwrap());
/// assert_eq!(second.at, Utc.with_ymd_and_hms(2025, 6, 5, 11, 0, 0).unwrap());
/// ```
#[derive(Debug)]
pub struct HearingAssigner<L, C> {
    finder: SlotFinder,
    ledger: L,
    clock: C,
    max_attempts: u32,
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl<L: HearingLedger, C: Clock> HearingAssigner<L, C> {
    /// Creates an assigner.
    pub fn new(finder: SlotFinder, ledger: L, clock: C) -> Self {
        Self {
            finder,
            ledger,
            clock,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Sets the number of reservation attempts (at least one).
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    /// The underlying ledger.
    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    /// The clock hearings are scheduled against.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// The slot finder.
    pub fn finder(&self) -> &SlotFinder {
        &self.finder
    }

    /// Finds and books the next hearing of `case_id` with `judge_id`.
    pub fn assign(&self, judge_id: &str, case_id: &str) -> SchedulingResult<SlotOutcome> {
        let lock = self.judge_lock(judge_id);
        let _guard = lock.lock();

        for attempt in 1..=self.max_attempts {
            let now = self.clock.now();
            let commitments = self.ledger.list_future_commitments(judge_id, now)?;
            let outcome = self
                .finder
                .find_next_slot_with(&commitments, now, &mut rand::rng());

            if outcome.is_fallback() {
                warn!(
                    judge_id,
                    case_id,
                    at = %outcome.at,
                    commitments = commitments.len(),
                    "no free slot within search budget, using fallback hearing"
                );
                self.ledger.reserve_fallback(judge_id, case_id, outcome.at)?;
                info!(judge_id, case_id, at = %outcome.at, attempt, "fallback hearing booked");
                return Ok(outcome);
            }

            let window_ms = self.finder.config().conflict_window_ms;
            match self.ledger.reserve(judge_id, case_id, outcome.at, window_ms) {
                Ok(()) => {
                    info!(judge_id, case_id, at = %outcome.at, attempt, "hearing booked");
                    return Ok(outcome);
                }
                Err(err) if err.is_retryable() => {
                    debug!(
                        judge_id,
                        case_id,
                        attempt,
                        %err,
                        "slot taken concurrently, retrying"
                    );
                }
                Err(err) => return Err(err),
            }
        }

        warn!(judge_id, case_id, attempts = self.max_attempts, "hearing booking gave up");
        Err(SchedulingError::RetriesExhausted {
            judge_id: judge_id.to_string(),
            attempts: self.max_attempts,
        })
    }

    fn judge_lock(&self, judge_id: &str) -> Arc<Mutex<()>> {
        self.locks
            .lock()
            .entry(judge_id.to_string())
            .or_default()
            .clone()
    }
}
