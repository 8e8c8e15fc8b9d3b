//! Benchmark run sequencing
//!
//! Phases run strictly in order: single-core, multi-core, GPU, scoring.
//! Observers receive a [`ProgressEvent`] on every status transition.

pub mod runner;
pub mod status;

pub use runner::{BenchmarkReport, Orchestrator, ProgressObserver};
pub use status::{BenchmarkStatus, ProgressEvent};
