//! Slot finder configuration.
//!
//! Every option has the court's standing default; `from_env` lets a
//! deployment override them through `DOCKET_*` variables.

use std::env;

use chrono::Weekday;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::models::WorkingCalendar;

/// Largest jitter range honored by [`Jitter::sample`], in minutes.
pub const MAX_JITTER_MINUTES: i64 = 24 * 60;

/// Cosmetic offset applied to each candidate so hearings do not all land
/// on round hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Jitter {
    /// Candidates sit exactly on slot boundaries.
    None,
    /// Uniform offset in `[-n, +n]` minutes.
    Minutes(i64),
}

impl Jitter {
    /// Draws an offset in minutes.
    ///
    /// Ranges beyond [`MAX_JITTER_MINUTES`] are capped to it.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> i64 {
        match *self {
            Jitter::Minutes(range) if range > 0 => {
                let range = range.min(MAX_JITTER_MINUTES);
                rng.random_range(-range..=range)
            }
            _ => 0,
        }
    }
}

impl Default for Jitter {
    fn default() -> Self {
        Jitter::Minutes(10)
    }
}

/// Slot finder parameters.
///
/// Working hours and weekdays live on the [`WorkingCalendar`]; the rest
/// controls search spacing, conflict detection, and the fallback.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotFinderConfig {
    /// Sitting calendar (hours, weekdays, blocked periods).
    pub calendar: WorkingCalendar,
    /// Spacing between consecutive slots (hours).
    pub slot_duration_hours: u32,
    /// Two hearings conflict if strictly closer than this (ms).
    pub conflict_window_ms: i64,
    /// Calendar days examined before giving up.
    pub max_day_attempts: u32,
    /// Per-candidate cosmetic offset.
    pub jitter: Jitter,
    /// Fallback lands this many days after now.
    pub fallback_offset_days: i64,
    /// Local hour of the fallback instant.
    pub fallback_hour: u32,
}

impl SlotFinderConfig {
    /// Creates the default configuration: 10:00-16:00, one-hour slots,
    /// one-hour conflict window, 30 day budget, ±10 minute jitter,
    /// fallback 14 days out at 11:00.
    pub fn new() -> Self {
        Self {
            calendar: WorkingCalendar::default(),
            slot_duration_hours: 1,
            conflict_window_ms: 3_600_000,
            max_day_attempts: 30,
            jitter: Jitter::default(),
            fallback_offset_days: 14,
            fallback_hour: 11,
        }
    }

    /// Sets the sitting calendar.
    pub fn with_calendar(mut self, calendar: WorkingCalendar) -> Self {
        self.calendar = calendar;
        self
    }

    /// Sets working hours `[start, end)`.
    pub fn with_hours(mut self, start_hour: u32, end_hour: u32) -> Self {
        self.calendar = self.calendar.with_hours(start_hour, end_hour);
        self
    }

    /// Sets the slot spacing.
    pub fn with_slot_duration_hours(mut self, hours: u32) -> Self {
        self.slot_duration_hours = hours;
        self
    }

    /// Sets the conflict window.
    pub fn with_conflict_window_ms(mut self, ms: i64) -> Self {
        self.conflict_window_ms = ms;
        self
    }

    /// Sets the day-attempt budget.
    pub fn with_max_day_attempts(mut self, attempts: u32) -> Self {
        self.max_day_attempts = attempts;
        self
    }

    /// Sets the jitter.
    pub fn with_jitter(mut self, jitter: Jitter) -> Self {
        self.jitter = jitter;
        self
    }

    /// Sets the fallback offset and hour.
    pub fn with_fallback(mut self, offset_days: i64, hour: u32) -> Self {
        self.fallback_offset_days = offset_days;
        self.fallback_hour = hour;
        self
    }

    /// First sitting hour.
    #[inline]
    pub fn work_start_hour(&self) -> u32 {
        self.calendar.work_start_hour
    }

    /// End of the sitting day (exclusive).
    #[inline]
    pub fn work_end_hour(&self) -> u32 {
        self.calendar.work_end_hour
    }

    /// Number of slots per working day.
    ///
    /// Zero when the hours are inverted or the slot duration is zero.
    pub fn slots_per_day(&self) -> u32 {
        if self.slot_duration_hours == 0 || self.work_end_hour() <= self.work_start_hour() {
            return 0;
        }
        (self.work_end_hour() - self.work_start_hour()) / self.slot_duration_hours
    }

    /// Loads configuration from `DOCKET_*` environment variables.
    ///
    /// Unset or unparsable values keep their default.
    ///
    /// | variable | option |
    /// |----------|--------|
    /// | `DOCKET_WORK_START_HOUR` | work start hour |
    /// | `DOCKET_WORK_END_HOUR` | work end hour |
    /// | `DOCKET_UTC_OFFSET_SECS` | court local offset |
    /// | `DOCKET_WORKING_DAYS` | comma list, e.g. `mon,tue,wed` |
    /// | `DOCKET_SLOT_DURATION_HOURS` | slot spacing |
    /// | `DOCKET_CONFLICT_WINDOW_MS` | conflict window |
    /// | `DOCKET_MAX_DAY_ATTEMPTS` | day budget |
    /// | `DOCKET_JITTER_MINUTES` | jitter range, 0 disables |
    /// | `DOCKET_FALLBACK_OFFSET_DAYS` | fallback offset |
    /// | `DOCKET_FALLBACK_HOUR` | fallback hour |
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads configuration through `lookup`, which maps a `DOCKET_*` key
    /// to its raw value. Same rules as [`SlotFinderConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let d = Self::new();
        let parse = |key: &str| lookup(key).and_then(|v| v.trim().parse::<i64>().ok());
        let hour = |key: &str, default: u32| {
            parse(key)
                .and_then(|v| u32::try_from(v).ok())
                .unwrap_or(default)
        };

        let working_days = lookup("DOCKET_WORKING_DAYS")
            .and_then(|raw| parse_weekdays(&raw))
            .filter(|days| !days.is_empty())
            .unwrap_or_else(|| d.calendar.working_days.clone());

        let utc_offset_secs = parse("DOCKET_UTC_OFFSET_SECS")
            .and_then(|v| i32::try_from(v).ok())
            .unwrap_or(d.calendar.utc_offset_secs);

        let calendar = WorkingCalendar::new("env")
            .with_hours(
                hour("DOCKET_WORK_START_HOUR", d.work_start_hour()),
                hour("DOCKET_WORK_END_HOUR", d.work_end_hour()),
            )
            .with_utc_offset_secs(utc_offset_secs)
            .with_working_days(working_days);

        let jitter = match parse("DOCKET_JITTER_MINUTES") {
            Some(0) => Jitter::None,
            Some(n) => Jitter::Minutes(n),
            None => d.jitter,
        };

        Self {
            calendar,
            slot_duration_hours: hour("DOCKET_SLOT_DURATION_HOURS", d.slot_duration_hours),
            conflict_window_ms: parse("DOCKET_CONFLICT_WINDOW_MS").unwrap_or(d.conflict_window_ms),
            max_day_attempts: hour("DOCKET_MAX_DAY_ATTEMPTS", d.max_day_attempts),
            jitter,
            fallback_offset_days: parse("DOCKET_FALLBACK_OFFSET_DAYS")
                .unwrap_or(d.fallback_offset_days),
            fallback_hour: hour("DOCKET_FALLBACK_HOUR", d.fallback_hour),
        }
    }
}

impl Default for SlotFinderConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Parses `mon,tue,...`. Returns `None` if any entry is not a weekday.
fn parse_weekdays(raw: &str) -> Option<Vec<Weekday>> {
    raw.split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<Weekday>().ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let c = SlotFinderConfig::new();
        assert_eq!(c.work_start_hour(), 10);
        assert_eq!(c.work_end_hour(), 16);
        assert_eq!(c.slots_per_day(), 6);
        assert_eq!(c.conflict_window_ms, 3_600_000);
        assert_eq!(c.max_day_attempts, 30);
        assert_eq!(c.jitter, Jitter::Minutes(10));
        assert_eq!(c.fallback_offset_days, 14);
        assert_eq!(c.fallback_hour, 11);
    }

    #[test]
    fn test_slots_per_day_degenerate() {
        assert_eq!(SlotFinderConfig::new().with_slot_duration_hours(0).slots_per_day(), 0);
        assert_eq!(SlotFinderConfig::new().with_hours(16, 10).slots_per_day(), 0);
        assert_eq!(SlotFinderConfig::new().with_slot_duration_hours(2).slots_per_day(), 3);
    }

    #[test]
    fn test_jitter_range() {
        let mut rng = SmallRng::seed_from_u64(42);
        for _ in 0..500 {
            let m = Jitter::Minutes(10).sample(&mut rng);
            assert!((-10..=10).contains(&m));
        }
        assert_eq!(Jitter::None.sample(&mut rng), 0);
        assert_eq!(Jitter::Minutes(0).sample(&mut rng), 0);
    }

    #[test]
    fn test_huge_jitter_is_capped() {
        let mut rng = SmallRng::seed_from_u64(9);
        for _ in 0..200 {
            let m = Jitter::Minutes(i64::MAX / 2).sample(&mut rng);
            assert!(m.abs() <= MAX_JITTER_MINUTES);
        }
    }

    #[test]
    fn test_parse_weekdays() {
        assert_eq!(
            parse_weekdays("mon, wed,fri"),
            Some(vec![Weekday::Mon, Weekday::Wed, Weekday::Fri])
        );
        assert_eq!(parse_weekdays("mon,funday"), None);
    }

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_lookup_unset_keeps_defaults() {
        let c = SlotFinderConfig::from_lookup(lookup(&[]));
        assert_eq!(c.work_start_hour(), 10);
        assert_eq!(c.work_end_hour(), 16);
        assert_eq!(c.calendar.working_days.len(), 5);
        assert_eq!(c.jitter, Jitter::Minutes(10));
        assert_eq!(c.max_day_attempts, 30);
        assert_eq!(c.fallback_offset_days, 14);
    }

    #[test]
    fn test_lookup_overrides() {
        let c = SlotFinderConfig::from_lookup(lookup(&[
            ("DOCKET_WORK_START_HOUR", "9"),
            ("DOCKET_WORK_END_HOUR", " 17 "),
            ("DOCKET_UTC_OFFSET_SECS", "-18000"),
            ("DOCKET_WORKING_DAYS", "mon,wed,fri"),
            ("DOCKET_SLOT_DURATION_HOURS", "2"),
            ("DOCKET_CONFLICT_WINDOW_MS", "7200000"),
            ("DOCKET_MAX_DAY_ATTEMPTS", "45"),
            ("DOCKET_JITTER_MINUTES", "5"),
            ("DOCKET_FALLBACK_OFFSET_DAYS", "21"),
            ("DOCKET_FALLBACK_HOUR", "12"),
        ]));
        assert_eq!(c.work_start_hour(), 9);
        assert_eq!(c.work_end_hour(), 17);
        assert_eq!(c.calendar.utc_offset_secs, -18_000);
        assert_eq!(
            c.calendar.working_days,
            vec![Weekday::Mon, Weekday::Wed, Weekday::Fri]
        );
        assert_eq!(c.slot_duration_hours, 2);
        assert_eq!(c.slots_per_day(), 4);
        assert_eq!(c.conflict_window_ms, 7_200_000);
        assert_eq!(c.max_day_attempts, 45);
        assert_eq!(c.jitter, Jitter::Minutes(5));
        assert_eq!(c.fallback_offset_days, 21);
        assert_eq!(c.fallback_hour, 12);
    }

    #[test]
    fn test_lookup_bad_values_keep_defaults() {
        let c = SlotFinderConfig::from_lookup(lookup(&[
            ("DOCKET_WORK_START_HOUR", "ten"),
            ("DOCKET_WORK_END_HOUR", "-4"),
            ("DOCKET_WORKING_DAYS", "mon,funday"),
            ("DOCKET_CONFLICT_WINDOW_MS", "1h"),
            ("DOCKET_UTC_OFFSET_SECS", "99999999999"),
            ("DOCKET_JITTER_MINUTES", ""),
        ]));
        assert_eq!(c.work_start_hour(), 10);
        assert_eq!(c.work_end_hour(), 16);
        assert_eq!(c.calendar.working_days.len(), 5);
        assert_eq!(c.conflict_window_ms, 3_600_000);
        assert_eq!(c.calendar.utc_offset_secs, 0);
        assert_eq!(c.jitter, Jitter::Minutes(10));
    }

    #[test]
    fn test_lookup_zero_jitter_disables() {
        let c = SlotFinderConfig::from_lookup(lookup(&[("DOCKET_JITTER_MINUTES", "0")]));
        assert_eq!(c.jitter, Jitter::None);
    }

    #[test]
    fn test_config_serde_shape() {
        let json = serde_json::to_value(SlotFinderConfig::new()).unwrap();
        assert_eq!(json["slot_duration_hours"], 1);
        assert_eq!(json["jitter"]["Minutes"], 10);
        assert_eq!(json["calendar"]["work_start_hour"], 10);
    }
}
