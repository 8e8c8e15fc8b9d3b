pub mod config;
pub mod constants;
pub mod error;
pub mod gpu;
pub mod kernel;
pub mod orchestrator;
pub mod persistence;
pub mod probes;
pub mod report;
pub mod scoring;
pub mod system_info;
pub mod time;

pub use config::BenchConfig;
pub use error::{BenchError, BenchResult};
pub use kernel::{ArithmeticKernel, KernelOutcome, StopSignal, Workload};
pub use orchestrator::{BenchmarkReport, BenchmarkStatus, Orchestrator, ProgressEvent};
pub use persistence::{HistoryEntry, HistoryLog};
pub use probes::{GpuProbe, MultiCoreProbe, Probe, ProbeKind, SingleCoreProbe};
pub use scoring::{composite, tier_for, CompositeResult, RawScores, Tier, TIERS};
pub use system_info::SystemDescriptor;
pub use time::{Clock, MonotonicClock, SharedClock, SteppingClock};
