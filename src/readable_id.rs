//! Human-facing case identifiers.
//!
//! Maps an opaque storage ID to `PREFIX-YYYY-XXXX`: the year of `now` in
//! whatever zone it is expressed in, and the last four characters of the
//! ID, upper-cased.
//!
//! IDs shorter than four characters contribute every character they
//! have; an empty ID yields `PREFIX-YYYY-`. Characters, not bytes, are
//! counted.

use chrono::{DateTime, Datelike, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Default prefix for case identifiers.
pub const DEFAULT_PREFIX: &str = "CAS";

/// Number of trailing ID characters kept.
const SUFFIX_LEN: usize = 4;

/// Generates readable IDs with a fixed prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadableIdGenerator {
    prefix: String,
}

impl ReadableIdGenerator {
    /// Creates a generator with the given prefix.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// The configured prefix.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Readable ID for `opaque_id` as of `now`.
    ///
    /// The year is read in `now`'s own zone; pass a court-local instant to
    /// get the court's year around New Year.
    pub fn generate<Tz: TimeZone>(&self, opaque_id: &str, now: DateTime<Tz>) -> String {
        let chars: Vec<char> = opaque_id.chars().collect();
        let tail: String = chars[chars.len().saturating_sub(SUFFIX_LEN)..]
            .iter()
            .collect();
        format!("{}-{:04}-{}", self.prefix, now.year(), tail.to_uppercase())
    }
}

impl Default for ReadableIdGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_PREFIX)
    }
}

/// Readable ID with the default `CAS` prefix.
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use docket_schedule::readable_id::generate_readable_id;
///
/// let now = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
/// assert_eq!(generate_readable_id("507f1f77bcf86cd799439011", now), "CAS-2025-9011");
/// ```
pub fn generate_readable_id(opaque_id: &str, now: DateTime<Utc>) -> String {
    ReadableIdGenerator::default().generate(opaque_id, now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn june_2025() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_object_id() {
        assert_eq!(
            generate_readable_id("507f1f77bcf86cd799439011", june_2025()),
            "CAS-2025-9011"
        );
    }

    #[test]
    fn test_upper_cases_suffix() {
        assert_eq!(
            generate_readable_id("65a1c0ffee4b89", june_2025()),
            "CAS-2025-4B89"
        );
    }

    #[test]
    fn test_deterministic() {
        let a = generate_readable_id("abcdef", june_2025());
        let b = generate_readable_id("abcdef", june_2025());
        assert_eq!(a, b);
    }

    #[test]
    fn test_short_and_empty_ids() {
        assert_eq!(generate_readable_id("ab", june_2025()), "CAS-2025-AB");
        assert_eq!(generate_readable_id("", june_2025()), "CAS-2025-");
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        assert_eq!(generate_readable_id("xxéçab", june_2025()), "CAS-2025-ÉÇAB");
    }

    #[test]
    fn test_custom_prefix_and_year() {
        let ids = ReadableIdGenerator::new("APP");
        let now = Utc.with_ymd_and_hms(2031, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(ids.generate("0000beef", now), "APP-2031-BEEF");
        assert_eq!(ids.prefix(), "APP");
    }

    #[test]
    fn test_year_follows_zone_of_now() {
        let ids = ReadableIdGenerator::default();
        let utc_eve = Utc.with_ymd_and_hms(2025, 12, 31, 20, 0, 0).unwrap();
        assert_eq!(ids.generate("0000beef", utc_eve), "CAS-2025-BEEF");
        let ist = FixedOffset::east_opt(19_800).unwrap();
        assert_eq!(
            ids.generate("0000beef", utc_eve.with_timezone(&ist)),
            "CAS-2026-BEEF"
        );
    }
}
