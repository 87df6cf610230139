//! Working calendar and time window models.
//!
//! Defines when a judge sits: working hours, working weekdays, and
//! blocked periods (leave, court holidays).
//!
//! # Time Model
//! Instants are UTC. Working hours and weekdays are evaluated in the
//! court's local time, expressed as a fixed UTC offset.
//!
//! # Precedence
//! Blocked periods override working time. An instant is available iff:
//! - its local weekday is a working day, AND
//! - its local time falls within working hours, AND
//! - it does NOT fall within any `blocked_periods` entry.

use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, Offset, TimeZone, Utc, Weekday};
use serde::{Deserialize, Serialize};

/// A time interval [start, end).
///
/// Half-open interval: includes start, excludes end.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimeWindow {
    /// Interval start (inclusive).
    pub start: DateTime<Utc>,
    /// Interval end (exclusive).
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    /// Creates a new time window.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// Duration of this window.
    #[inline]
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Whether an instant falls within this window.
    #[inline]
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        at >= self.start && at < self.end
    }

    /// Whether two windows overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Whether this window fully covers `other`.
    pub fn covers(&self, other: &Self) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Clamps an instant into [start, end - 1 minute].
    ///
    /// An empty or inverted window returns `start`.
    pub fn clamp(&self, at: DateTime<Utc>) -> DateTime<Utc> {
        let last = self.end - Duration::minutes(1);
        if last <= self.start || at < self.start {
            self.start
        } else if at > last {
            last
        } else {
            at
        }
    }
}

/// A judge's sitting calendar.
///
/// Combines working hours and weekdays with negative blocked periods.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkingCalendar {
    /// Calendar identifier.
    pub id: String,
    /// Court local time as seconds east of UTC.
    pub utc_offset_secs: i32,
    /// First hour of the working day (local, inclusive).
    pub work_start_hour: u32,
    /// Hour at which the working day ends (local, exclusive).
    pub work_end_hour: u32,
    /// Weekdays on which hearings are held.
    pub working_days: Vec<Weekday>,
    /// Periods when the judge is unavailable (overrides working time).
    pub blocked_periods: Vec<TimeWindow>,
}

impl WorkingCalendar {
    /// Creates a calendar sitting 10:00-16:00 UTC, Monday to Friday.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            utc_offset_secs: 0,
            work_start_hour: 10,
            work_end_hour: 16,
            working_days: vec![
                Weekday::Mon,
                Weekday::Tue,
                Weekday::Wed,
                Weekday::Thu,
                Weekday::Fri,
            ],
            blocked_periods: Vec::new(),
        }
    }

    /// Sets working hours `[start_hour, end_hour)`.
    pub fn with_hours(mut self, start_hour: u32, end_hour: u32) -> Self {
        self.work_start_hour = start_hour;
        self.work_end_hour = end_hour;
        self
    }

    /// Sets the court's local offset from UTC.
    pub fn with_utc_offset_secs(mut self, secs: i32) -> Self {
        self.utc_offset_secs = secs;
        self
    }

    /// Replaces the working weekdays.
    pub fn with_working_days(mut self, days: Vec<Weekday>) -> Self {
        self.working_days = days;
        self
    }

    /// Adds a blocked period.
    pub fn with_blocked(mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        self.blocked_periods.push(TimeWindow::new(start, end));
        self
    }

    /// Court local offset. Out-of-range values fall back to UTC.
    pub fn offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_secs).unwrap_or_else(|| Utc.fix())
    }

    /// Local calendar date of an instant.
    pub fn local_date(&self, at: DateTime<Utc>) -> NaiveDate {
        at.with_timezone(&self.offset()).date_naive()
    }

    /// Instant at `hour:minute` local time on `date`.
    ///
    /// Out-of-range hours and minutes roll over into following days.
    pub fn at_local(&self, date: NaiveDate, hour: u32, minute: i64) -> DateTime<Utc> {
        let local = date.and_time(chrono::NaiveTime::MIN)
            + Duration::hours(i64::from(hour))
            + Duration::minutes(minute);
        let utc = local - Duration::seconds(i64::from(self.offset().local_minus_utc()));
        Utc.from_utc_datetime(&utc)
    }

    /// Working window of a date: `[work_start_hour, work_end_hour)` local.
    pub fn working_window(&self, date: NaiveDate) -> TimeWindow {
        TimeWindow::new(
            self.at_local(date, self.work_start_hour, 0),
            self.at_local(date, self.work_end_hour, 0),
        )
    }

    /// Whether hearings can be held on `date` at all.
    ///
    /// False on non-working weekdays and on days whose working window is
    /// fully covered by a single blocked period.
    pub fn is_working_day(&self, date: NaiveDate) -> bool {
        if !self.working_days.contains(&date.weekday()) {
            return false;
        }
        let window = self.working_window(date);
        !self.blocked_periods.iter().any(|bp| bp.covers(&window))
    }

    /// Whether an instant falls in a blocked period.
    pub fn is_blocked(&self, at: DateTime<Utc>) -> bool {
        self.blocked_periods.iter().any(|bp| bp.contains(at))
    }

    /// Whether an instant is within working time.
    pub fn is_working_time(&self, at: DateTime<Utc>) -> bool {
        let date = self.local_date(at);
        self.is_working_day(date)
            && self.working_window(date).contains(at)
            && !self.is_blocked(at)
    }
}

impl Default for WorkingCalendar {
    fn default() -> Self {
        Self::new("default")
    }
}
