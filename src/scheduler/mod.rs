//! Hearing slot search.
//!
//! Provides the first-fit slot finder and its configuration.
//!
//! # Algorithm
//!
//! `SlotFinder` walks forward from tomorrow, one calendar day at a time,
//! and returns the earliest slot of the earliest working day that keeps a
//! full conflict window away from every existing hearing. A bounded day
//! budget and a fixed fallback instant make it total.
//!
//! # Time
//!
//! "Now" is always an explicit argument. Workflows read it from a
//! [`Clock`]; tests pin it with [`FixedClock`].

mod clock;
mod config;
mod slot_finder;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{Jitter, SlotFinderConfig, MAX_JITTER_MINUTES};
pub use slot_finder::{SlotFinder, SlotKind, SlotOutcome};
