//! Input validation for hearing scheduling.
//!
//! Checks structural integrity of a slot finder configuration and a judge
//! roster before they are used. Detects:
//! - Inverted or out-of-range working hours
//! - Slot durations that do not tile the working day
//! - Empty working weeks and duplicate weekdays
//! - Non-positive conflict windows and zero search budgets
//! - Jitter ranges that are negative or as long as a slot
//! - Duplicate judge IDs
//!
//! The slot finder itself stays total on any configuration; validation
//! exists so a deployment learns about a nonsensical setup up front rather
//! than from a stream of fallback hearings.

use std::collections::HashSet;

use crate::models::Judge;
use crate::scheduler::{Jitter, SlotFinderConfig};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Working hours are inverted, empty, or beyond 24.
    InvalidHours,
    /// Slot duration is zero or does not divide the working window.
    InvalidSlotDuration,
    /// No working weekdays, or a weekday listed twice.
    InvalidWorkingDays,
    /// Conflict window is not positive.
    InvalidConflictWindow,
    /// Day budget is zero.
    InvalidSearchBudget,
    /// Fallback hour beyond 23 or negative fallback offset.
    InvalidFallback,
    /// Negative jitter range, or one spanning a whole slot.
    InvalidJitter,
    /// Two judges share the same ID.
    DuplicateId,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a slot finder configuration.
///
/// Checks:
/// 1. `work_start_hour < work_end_hour <= 24`
/// 2. Slot duration is positive and divides the working window
/// 3. At least one working weekday, none repeated
/// 4. Conflict window is positive
/// 5. Day budget is positive
/// 6. Fallback hour is below 24 and the offset is not negative
/// 7. Jitter range is not negative and shorter than one slot
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_config(config: &SlotFinderConfig) -> ValidationResult {
    let mut errors = Vec::new();
    let start = config.work_start_hour();
    let end = config.work_end_hour();

    if start >= end || end > 24 {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidHours,
            format!("Working hours {start}..{end} are not a valid range within a day"),
        ));
    }

    if config.slot_duration_hours == 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidSlotDuration,
            "Slot duration must be at least one hour",
        ));
    } else if start < end && (end - start) % config.slot_duration_hours != 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidSlotDuration,
            format!(
                "Slot duration {}h does not divide working window {start}..{end}",
                config.slot_duration_hours
            ),
        ));
    }

    let days = &config.calendar.working_days;
    if days.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidWorkingDays,
            "Calendar has no working days",
        ));
    }
    let mut seen = HashSet::new();
    for day in days {
        if !seen.insert(*day) {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidWorkingDays,
                format!("Working day {day} listed more than once"),
            ));
        }
    }

    if config.conflict_window_ms <= 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidConflictWindow,
            format!("Conflict window must be positive, got {}ms", config.conflict_window_ms),
        ));
    }

    if config.max_day_attempts == 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidSearchBudget,
            "Day-attempt budget must be positive",
        ));
    }

    if config.fallback_hour >= 24 {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidFallback,
            format!("Fallback hour {} is not within a day", config.fallback_hour),
        ));
    }
    if config.fallback_offset_days < 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidFallback,
            format!("Fallback offset {} days lies in the past", config.fallback_offset_days),
        ));
    }

    if let Jitter::Minutes(range) = config.jitter {
        let slot_minutes = i64::from(config.slot_duration_hours) * 60;
        if range < 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidJitter,
                format!("Jitter range must not be negative, got {range}"),
            ));
        } else if slot_minutes > 0 && range >= slot_minutes {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidJitter,
                format!("Jitter range {range} min must be shorter than a {slot_minutes} min slot"),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates a judge roster: no duplicate IDs.
pub fn validate_roster(judges: &[Judge]) -> ValidationResult {
    let mut ids = HashSet::new();
    let errors: Vec<ValidationError> = judges
        .iter()
        .filter(|j| !ids.insert(j.id.as_str()))
        .map(|j| {
            ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate judge ID: {}", j.id),
            )
        })
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WorkingCalendar;
    use chrono::Weekday;

    fn has(errors: &[ValidationError], kind: ValidationErrorKind) -> bool {
        errors.iter().any(|e| e.kind == kind)
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&SlotFinderConfig::new()).is_ok());
    }

    #[test]
    fn test_inverted_hours() {
        let errors = validate_config(&SlotFinderConfig::new().with_hours(16, 10)).unwrap_err();
        assert!(has(&errors, ValidationErrorKind::InvalidHours));
    }

    #[test]
    fn test_hours_past_midnight() {
        let errors = validate_config(&SlotFinderConfig::new().with_hours(20, 26)).unwrap_err();
        assert!(has(&errors, ValidationErrorKind::InvalidHours));
    }

    #[test]
    fn test_slot_duration_must_tile() {
        let errors =
            validate_config(&SlotFinderConfig::new().with_slot_duration_hours(4)).unwrap_err();
        assert!(has(&errors, ValidationErrorKind::InvalidSlotDuration));
        assert!(validate_config(&SlotFinderConfig::new().with_slot_duration_hours(3)).is_ok());

        let errors =
            validate_config(&SlotFinderConfig::new().with_slot_duration_hours(0)).unwrap_err();
        assert!(has(&errors, ValidationErrorKind::InvalidSlotDuration));
    }

    #[test]
    fn test_working_days() {
        let empty = SlotFinderConfig::new()
            .with_calendar(WorkingCalendar::default().with_working_days(vec![]));
        assert!(has(
            &validate_config(&empty).unwrap_err(),
            ValidationErrorKind::InvalidWorkingDays
        ));

        let dup = SlotFinderConfig::new().with_calendar(
            WorkingCalendar::default().with_working_days(vec![Weekday::Mon, Weekday::Mon]),
        );
        let errors = validate_config(&dup).unwrap_err();
        assert!(errors[0].message.contains("Mon"));
    }

    #[test]
    fn test_multiple_errors() {
        let config = SlotFinderConfig::new()
            .with_conflict_window_ms(0)
            .with_max_day_attempts(0)
            .with_fallback(-1, 30)
            .with_jitter(Jitter::Minutes(-5));
        let errors = validate_config(&config).unwrap_err();
        assert!(has(&errors, ValidationErrorKind::InvalidConflictWindow));
        assert!(has(&errors, ValidationErrorKind::InvalidSearchBudget));
        assert!(has(&errors, ValidationErrorKind::InvalidJitter));
        assert_eq!(
            errors
                .iter()
                .filter(|e| e.kind == ValidationErrorKind::InvalidFallback)
                .count(),
            2
        );
    }

    #[test]
    fn test_jitter_must_fit_in_slot() {
        let huge = SlotFinderConfig::new().with_jitter(Jitter::Minutes(i64::MAX / 2));
        assert!(has(&validate_config(&huge).unwrap_err(), ValidationErrorKind::InvalidJitter));

        let whole_slot = SlotFinderConfig::new().with_jitter(Jitter::Minutes(60));
        assert!(validate_config(&whole_slot).is_err());

        let two_hour_slots = SlotFinderConfig::new()
            .with_hours(10, 16)
            .with_slot_duration_hours(2)
            .with_jitter(Jitter::Minutes(60));
        assert!(validate_config(&two_hour_slots).is_ok());
        assert!(validate_config(&SlotFinderConfig::new().with_jitter(Jitter::Minutes(59))).is_ok());
    }

    #[test]
    fn test_duplicate_judge_id() {
        let judges = vec![
            Judge::new("J1", "A. Rao"),
            Judge::new("J2", "B. Sen"),
            Judge::new("J1", "C. Das"),
        ];
        let errors = validate_roster(&judges).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::DuplicateId);
        assert!(validate_roster(&judges[..2]).is_ok());
    }
}
