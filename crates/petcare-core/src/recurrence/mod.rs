//! Recurring-reminder state machine.
//!
//! A reminder is Open or Completed. Completing a repeating reminder spawns
//! one Open successor due at the next occurrence; reopening never retracts
//! it. Every function here is pure: collection-level transitions return a
//! new `Vec` and leave the caller's snapshot untouched.

mod lifecycle;
mod schedule;

pub use lifecycle::*;
pub use schedule::*;
