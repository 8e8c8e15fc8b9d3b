//! Clock abstraction shared by every probe
//!
//! Probes read time only through [`Clock`], so tests can drive them with a
//! deterministic clock instead of the wall clock.

pub mod clock;

pub use clock::{Clock, ManualClock, MonotonicClock, SharedClock, SteppingClock};
