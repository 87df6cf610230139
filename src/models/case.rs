//! Case and judge records.
//!
//! Minimal views of the persisted case and judge documents, carrying only
//! the fields the scheduling workflow reads or writes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a case.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseStatus {
    /// Submitted and awaiting review.
    #[default]
    Filed,
    /// Saved but not submitted; never gets a hearing.
    Draft,
    /// Under judicial review.
    UnderReview,
    /// AI analysis attached.
    AiAnalyzed,
    /// Awaiting verdict.
    PreVerdict,
    /// Verdict delivered.
    PostVerdict,
    /// Closed.
    Closed,
}

impl CaseStatus {
    /// Whether the case still belongs on a judge's hearing docket.
    pub fn is_open(self) -> bool {
        !matches!(self, CaseStatus::PostVerdict | CaseStatus::Closed)
    }
}

/// A case as seen by the scheduler.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseRecord {
    /// Opaque storage identifier.
    pub id: String,
    /// Display identifier, e.g. `CAS-2025-9011`.
    pub readable_id: Option<String>,
    /// Case title.
    pub title: String,
    /// Case type (civil, criminal, ...).
    pub case_type: String,
    /// Lifecycle status.
    pub status: CaseStatus,
    /// Assigned judge ID.
    pub assigned_judge: Option<String>,
    /// Next scheduled hearing.
    pub next_hearing: Option<DateTime<Utc>>,
}

impl CaseRecord {
    /// Creates a filed case with no judge or hearing.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            readable_id: None,
            title: title.into(),
            case_type: "other".to_string(),
            status: CaseStatus::Filed,
            assigned_judge: None,
            next_hearing: None,
        }
    }

    /// Replaces the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the case type.
    pub fn with_case_type(mut self, case_type: impl Into<String>) -> Self {
        self.case_type = case_type.into();
        self
    }

    /// Sets the status.
    pub fn with_status(mut self, status: CaseStatus) -> Self {
        self.status = status;
        self
    }

    /// Assigns a judge.
    pub fn with_judge(mut self, judge_id: impl Into<String>) -> Self {
        self.assigned_judge = Some(judge_id.into());
        self
    }

    /// Sets the next hearing.
    pub fn with_next_hearing(mut self, at: DateTime<Utc>) -> Self {
        self.next_hearing = Some(at);
        self
    }

    /// Sets the readable identifier.
    pub fn with_readable_id(mut self, readable_id: impl Into<String>) -> Self {
        self.readable_id = Some(readable_id.into());
        self
    }
}

/// A judge on the court roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Judge {
    /// Unique judge identifier.
    pub id: String,
    /// Display name.
    pub full_name: String,
    /// City the judge is posted to.
    pub posted_city: Option<String>,
}

impl Judge {
    /// Creates a judge with no posting.
    pub fn new(id: impl Into<String>, full_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            full_name: full_name.into(),
            posted_city: None,
        }
    }

    /// Sets the posted city.
    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.posted_city = Some(city.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_statuses() {
        assert!(CaseStatus::Filed.is_open());
        assert!(CaseStatus::PreVerdict.is_open());
        assert!(!CaseStatus::PostVerdict.is_open());
        assert!(!CaseStatus::Closed.is_open());
    }

    #[test]
    fn test_status_serde_shape() {
        let json = serde_json::to_string(&CaseStatus::UnderReview).unwrap();
        assert_eq!(json, "\"under_review\"");
        let back: CaseStatus = serde_json::from_str("\"ai_analyzed\"").unwrap();
        assert_eq!(back, CaseStatus::AiAnalyzed);
    }
}
