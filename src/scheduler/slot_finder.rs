//! First-fit hearing slot search.
//!
//! # Algorithm
//!
//! 1. Start on the local day after `now`.
//! 2. For up to `max_day_attempts` calendar days:
//!    - skip non-working days (each still consumes an attempt);
//!    - otherwise try the day's slots earliest first. Each candidate is the
//!      slot start plus jitter, clamped to working hours. The first
//!      candidate outside blocked periods and at least
//!      `conflict_window_ms` away from every commitment wins.
//! 3. If the budget runs out, return `now + fallback_offset_days` at
//!    `fallback_hour:00` local, without any conflict check.
//!
//! The instant returned by a successful search is exactly the instant that
//! was checked, so the conflict invariant holds with jitter enabled.
//!
//! # Complexity
//! O(d * s * c) where d=day budget, s=slots per day, c=commitments.

use chrono::{DateTime, Days, Duration, NaiveDate, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::SlotFinderConfig;
use crate::models::within_window;

/// How a slot was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlotKind {
    /// Conflict-free slot found by the search.
    Found {
        /// Day attempt (0 = tomorrow) on which the slot was found.
        day_attempt: u32,
        /// Slot index within that day (0 = first sitting hour).
        slot_index: u32,
    },
    /// Search budget exhausted; fixed fallback instant.
    Fallback,
}

/// Result of a slot search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotOutcome {
    /// Scheduled hearing instant.
    pub at: DateTime<Utc>,
    /// Search path taken.
    pub kind: SlotKind,
}

impl SlotOutcome {
    /// Whether the fallback path was taken.
    #[inline]
    pub fn is_fallback(&self) -> bool {
        self.kind == SlotKind::Fallback
    }
}

/// Finds the next available hearing slot for a judge.
///
/// Pure apart from jitter randomness: the judge's commitments and `now`
/// are passed in, nothing is stored.
///
/// # Example
///
/// ```
/// use chrono::{TimeZone, Timelike, Utc};
/// use docket_schedule::scheduler::{Jitter, SlotFinder, SlotFinderConfig};
///
/// let finder = SlotFinder::new(SlotFinderConfig::new().with_jitter(Jitter::None));
/// let now = Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap(); // Sunday
/// let slot = finder.find_next_slot(&[], now);
/// assert_eq!(slot, Utc.with_ymd_and_hms(2025, 6, 2, 10, 0, 0).unwrap());
/// assert_eq!(slot.hour(), 10);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SlotFinder {
    config: SlotFinderConfig,
}

impl SlotFinder {
    /// Creates a finder with the given configuration.
    pub fn new(config: SlotFinderConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    pub fn config(&self) -> &SlotFinderConfig {
        &self.config
    }

    /// Next hearing instant, jittered with the thread-local RNG.
    pub fn find_next_slot(
        &self,
        commitments: &[DateTime<Utc>],
        now: DateTime<Utc>,
    ) -> DateTime<Utc> {
        self.find_next_slot_with(commitments, now, &mut rand::rng()).at
    }

    /// Next hearing slot using the supplied RNG for jitter.
    ///
    /// Commitments may be in any order and may include past instants.
    pub fn find_next_slot_with<R: Rng + ?Sized>(
        &self,
        commitments: &[DateTime<Utc>],
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> SlotOutcome {
        let cal = &self.config.calendar;
        let slots_per_day = self.config.slots_per_day();
        let mut day = next_day(cal.local_date(now));

        for day_attempt in 0..self.config.max_day_attempts {
            if !cal.is_working_day(day) {
                day = next_day(day);
                continue;
            }

            let window = cal.working_window(day);
            for slot_index in 0..slots_per_day {
                let hour = cal.work_start_hour + slot_index * self.config.slot_duration_hours;
                let base = cal.at_local(day, hour, 0);
                let jittered = Duration::try_minutes(self.config.jitter.sample(rng))
                    .and_then(|offset| base.checked_add_signed(offset))
                    .unwrap_or(base);
                let candidate = window.clamp(jittered);

                if cal.is_blocked(candidate) {
                    continue;
                }
                let conflict = commitments
                    .iter()
                    .any(|c| within_window(*c, candidate, self.config.conflict_window_ms));
                if !conflict {
                    return SlotOutcome {
                        at: candidate,
                        kind: SlotKind::Found {
                            day_attempt,
                            slot_index,
                        },
                    };
                }
            }

            day = next_day(day);
        }

        SlotOutcome {
            at: self.fallback(now),
            kind: SlotKind::Fallback,
        }
    }

    /// The fallback instant: `now + fallback_offset_days` at `fallback_hour:00` local.
    pub fn fallback(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        let cal = &self.config.calendar;
        let today = cal.local_date(now);
        let offset = self.config.fallback_offset_days;
        let date = if offset >= 0 {
            today.checked_add_days(Days::new(offset.unsigned_abs()))
        } else {
            today.checked_sub_days(Days::new(offset.unsigned_abs()))
        }
        .unwrap_or(today);
        cal.at_local(date, self.config.fallback_hour, 0)
    }
}

/// Following calendar day; saturates at the last representable date.
fn next_day(date: NaiveDate) -> NaiveDate {
    date.succ_opt().unwrap_or(date)
}
