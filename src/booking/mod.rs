//! Per-judge hearing booking.
//!
//! The slot finder works on a snapshot of a judge's commitments, so
//! "read commitments, find slot, persist" is a check-then-act sequence.
//! This module supplies the pieces that make it safe:
//!
//! - **`CommitmentSource` / `HearingLedger`**: the storage seam. A ledger
//!   must reject a second booking of the same (judge, slot key), where
//!   the key rounds the instant to the conflict window.
//! - **`InMemoryLedger`**: reference ledger enforcing that constraint.
//! - **`HearingAssigner`**: serializes bookings per judge and retries
//!   with fresh commitments when the ledger reports the slot taken.

mod assigner;
mod ledger;

pub use assigner::HearingAssigner;
pub use ledger::{slot_key, CommitmentSource, HearingLedger, InMemoryLedger};
