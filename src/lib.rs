//! Hearing-slot scheduling for court case management.
//!
//! Assigns a judge's next hearing without double-booking, confined to
//! sitting hours and working days, with a deterministic fallback when the
//! judge is booked solid. Also derives the short case IDs shown to users.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Commitment`, `WorkingCalendar`,
//!   `TimeWindow`, `CaseRecord`, `Judge`
//! - **`scheduler`**: `SlotFinder` first-fit search, its configuration,
//!   and the `Clock` seam
//! - **`readable_id`**: `CAS-YYYY-XXXX` case identifiers
//! - **`booking`**: Per-judge serialized read-find-persist with retry
//! - **`roster`**: Judge selection by filing city
//! - **`intake`**: Case filing workflow
//! - **`docket`**: A judge's ordered hearing list with priorities
//! - **`validation`**: Configuration and roster integrity checks
//!
//! # Architecture
//!
//! `scheduler` and `readable_id` are pure: they read a snapshot and the
//! current time, and return a value. Everything with side effects
//! (ledgers, locks, logging) lives in `booking` and `intake`.

pub mod booking;
pub mod docket;
pub mod error;
pub mod intake;
pub mod models;
pub mod readable_id;
pub mod roster;
pub mod scheduler;
pub mod validation;

pub use error::{SchedulingError, SchedulingResult};
