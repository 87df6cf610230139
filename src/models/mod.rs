//! Hearing scheduling domain models.
//!
//! Provides the data types the scheduler reads and produces. Storage of
//! these records belongs to the surrounding case-management system.
//!
//! # Domain Mappings
//!
//! | docket-schedule | Court | Generic scheduling |
//! |-----------------|-------|--------------------|
//! | Commitment | Booked hearing | Assignment |
//! | WorkingCalendar | Sitting hours | Resource calendar |
//! | Judge | Judge | Resource |
//! | CaseRecord | Case file | Task |

mod calendar;
mod case;
mod commitment;

pub use calendar::{TimeWindow, WorkingCalendar};
pub use case::{CaseRecord, CaseStatus, Judge};
pub use commitment::{instants_for_judge, within_window, Commitment};
