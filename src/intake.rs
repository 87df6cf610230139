//! Case filing workflow.
//!
//! Files a new case: picks a judge for the filing city, books the first
//! hearing (skipped for drafts), and stamps the readable case ID.
//!
//! Updating an existing record (typically a draft being submitted) runs
//! the same steps, except that a readable ID already on the record is
//! kept and a draft update leaves any earlier hearing in place.
//!
//! Storage of the resulting record is left to the caller; the hearing
//! itself is already reserved on the assigner's ledger.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::booking::{HearingAssigner, HearingLedger};
use crate::error::SchedulingResult;
use crate::models::{CaseRecord, CaseStatus, Judge};
use crate::readable_id::ReadableIdGenerator;
use crate::roster::JudgeRoster;
use crate::scheduler::{Clock, SlotOutcome};

/// A request to file a case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseFiling {
    /// Opaque ID allocated by storage.
    pub case_id: String,
    /// Case title.
    pub title: String,
    /// Case type, stored lower-cased.
    pub case_type: String,
    /// Filing city, used to pick a local judge.
    pub city: Option<String>,
    /// Save without submitting; drafts get no hearing.
    pub draft: bool,
}

impl CaseFiling {
    /// Creates a submitted filing.
    pub fn new(
        case_id: impl Into<String>,
        title: impl Into<String>,
        case_type: impl Into<String>,
    ) -> Self {
        Self {
            case_id: case_id.into(),
            title: title.into(),
            case_type: case_type.into(),
            city: None,
            draft: false,
        }
    }

    /// Sets the filing city.
    pub fn in_city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    /// Marks the filing as a draft.
    pub fn as_draft(mut self) -> Self {
        self.draft = true;
        self
    }
}

/// Outcome of filing a case.
#[derive(Debug, Clone)]
pub struct FiledCase {
    /// The case record to persist.
    pub case: CaseRecord,
    /// Assigned judge.
    pub judge: Judge,
    /// Booked hearing; `None` for drafts.
    pub hearing: Option<SlotOutcome>,
}

/// Files cases against a roster and a hearing ledger.
#[derive(Debug)]
pub struct CaseIntake<L, C> {
    roster: JudgeRoster,
    assigner: HearingAssigner<L, C>,
    ids: ReadableIdGenerator,
}

impl<L: HearingLedger, C: Clock> CaseIntake<L, C> {
    /// Creates an intake with the default `CAS` ID prefix.
    pub fn new(roster: JudgeRoster, assigner: HearingAssigner<L, C>) -> Self {
        Self {
            roster,
            assigner,
            ids: ReadableIdGenerator::default(),
        }
    }

    /// Sets the readable ID generator.
    pub fn with_ids(mut self, ids: ReadableIdGenerator) -> Self {
        self.ids = ids;
        self
    }

    /// The hearing assigner.
    pub fn assigner(&self) -> &HearingAssigner<L, C> {
        &self.assigner
    }

    /// Files a case.
    pub fn file(&self, filing: CaseFiling) -> SchedulingResult<FiledCase> {
        let record = CaseRecord::new(filing.case_id.clone(), filing.title.clone());
        let filed = self.settle(record, &filing)?;
        info!(
            case_id = %filed.case.id,
            readable_id = filed.case.readable_id.as_deref().unwrap_or_default(),
            judge_id = %filed.judge.id,
            draft = filing.draft,
            "case filed"
        );
        Ok(filed)
    }

    /// Updates an existing case from a new filing, usually to submit a
    /// draft.
    ///
    /// The judge is picked again and, unless the filing is still a draft,
    /// a hearing is booked. The record keeps its ID and any readable ID it
    /// already has; `filing.case_id` is ignored.
    pub fn update(&self, existing: CaseRecord, filing: CaseFiling) -> SchedulingResult<FiledCase> {
        let filed = self.settle(existing, &filing)?;
        info!(
            case_id = %filed.case.id,
            readable_id = filed.case.readable_id.as_deref().unwrap_or_default(),
            judge_id = %filed.judge.id,
            draft = filing.draft,
            "case updated"
        );
        Ok(filed)
    }

    fn settle(&self, record: CaseRecord, filing: &CaseFiling) -> SchedulingResult<FiledCase> {
        let judge = self
            .roster
            .pick(filing.city.as_deref(), &mut rand::rng())?
            .clone();

        let hearing = if filing.draft {
            None
        } else {
            Some(self.assigner.assign(&judge.id, &record.id)?)
        };

        let readable_id = match record.readable_id.clone() {
            Some(existing) => existing,
            None => {
                let offset = self.assigner.finder().config().calendar.offset();
                let now = self.assigner.clock().now().with_timezone(&offset);
                self.ids.generate(&record.id, now)
            }
        };

        let mut case = record
            .with_title(filing.title.clone())
            .with_case_type(filing.case_type.to_lowercase())
            .with_status(if filing.draft {
                CaseStatus::Draft
            } else {
                CaseStatus::Filed
            })
            .with_judge(judge.id.clone())
            .with_readable_id(readable_id);
        if let Some(h) = hearing {
            case = case.with_next_hearing(h.at);
        }

        Ok(FiledCase {
            case,
            judge,
            hearing,
        })
    }
}
