//! Run history persistence
//!
//! Completed runs are appended to a JSON array on disk. Entries are never
//! mutated; the whole log can be cleared.

pub mod error;
pub mod history;

pub use error::{atomic_write, history_io, HistoryErrorContext};
pub use history::{HistoryEntry, HistoryLog};
