//! Judge hearing docket.
//!
//! Builds a judge's list of open cases ordered by next hearing, with
//! display fields and an urgency classification.
//!
//! # Priority
//!
//! | Priority | Next hearing |
//! |----------|--------------|
//! | High | within 3 days of now (or overdue) |
//! | Medium | within 7 days |
//! | Low | later, or not scheduled |

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{CaseRecord, CaseStatus, WorkingCalendar};
use crate::readable_id::ReadableIdGenerator;

/// Urgency of an upcoming hearing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HearingPriority {
    /// Hearing within three days.
    High,
    /// Hearing within a week.
    Medium,
    /// Hearing further out or unscheduled.
    Low,
}

impl HearingPriority {
    /// Classifies a hearing relative to `now`. Both bounds are inclusive.
    pub fn classify(hearing: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Self {
        match hearing {
            Some(at) if at <= now + Duration::days(3) => HearingPriority::High,
            Some(at) if at <= now + Duration::days(7) => HearingPriority::Medium,
            _ => HearingPriority::Low,
        }
    }

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            HearingPriority::High => "High Priority",
            HearingPriority::Medium => "Medium Priority",
            HearingPriority::Low => "Low Priority",
        }
    }
}

impl fmt::Display for HearingPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One row of a judge's docket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocketEntry {
    /// Opaque case ID.
    pub case_id: String,
    /// Readable case ID (generated when the record lacks one).
    pub readable_id: String,
    /// Case title.
    pub title: String,
    /// Case status.
    pub status: CaseStatus,
    /// Case type.
    pub case_type: String,
    /// Hearing instant.
    pub next_hearing: Option<DateTime<Utc>>,
    /// Local hearing date, `YYYY-MM-DD`.
    pub next_hearing_date: Option<String>,
    /// Local hearing time, `HH:MM`.
    pub next_hearing_time: Option<String>,
    /// Urgency.
    pub priority: HearingPriority,
}

/// Builds the docket of `judge_id` from `cases`.
///
/// Keeps open cases assigned to the judge. Unscheduled cases come first
/// in input order, then the rest by earliest hearing. Dates, times and
/// generated readable IDs use the calendar's local offset.
pub fn build_docket(
    cases: &[CaseRecord],
    judge_id: &str,
    now: DateTime<Utc>,
    calendar: &WorkingCalendar,
    ids: &ReadableIdGenerator,
) -> Vec<DocketEntry> {
    let offset = calendar.offset();
    let mut entries: Vec<DocketEntry> = cases
        .iter()
        .filter(|c| c.status.is_open() && c.assigned_judge.as_deref() == Some(judge_id))
        .map(|c| {
            let local = c.next_hearing.map(|at| at.with_timezone(&offset));
            DocketEntry {
                case_id: c.id.clone(),
                readable_id: c
                    .readable_id
                    .clone()
                    .unwrap_or_else(|| ids.generate(&c.id, now.with_timezone(&offset))),
                title: c.title.clone(),
                status: c.status,
                case_type: c.case_type.clone(),
                next_hearing: c.next_hearing,
                next_hearing_date: local.map(|t| t.format("%Y-%m-%d").to_string()),
                next_hearing_time: local.map(|t| t.format("%H:%M").to_string()),
                priority: HearingPriority::classify(c.next_hearing, now),
            }
        })
        .collect();

    // None sorts before Some; stable, so ties keep input order
    entries.sort_by_key(|e| e.next_hearing);
    entries
}
