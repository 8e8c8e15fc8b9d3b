//! Benchmark probes
//!
//! Every probe is a function of a duration (plus an injected clock) that
//! returns a non-negative score. Expected degraded conditions become a score
//! of 0; only unexpected failures surface as errors.

pub mod context;
pub mod gpu_probe;
pub mod multi_core;
pub mod single_core;

use std::time::{Duration, Instant};

use crate::error::BenchResult;

pub use context::{Collection, ContextGroup, ContextReport, StartMessage};
pub use gpu_probe::{consistency_factor, GpuProbe, GpuProbeState, GpuSample, TargetFactory};
pub use multi_core::{MultiCoreProbe, MultiCoreSample};
pub use single_core::SingleCoreProbe;

/// Which measurement a probe performs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProbeKind {
    SingleCore,
    MultiCore,
    Gpu,
}

impl ProbeKind {
    pub fn name(&self) -> &'static str {
        match self {
            ProbeKind::SingleCore => "single-core",
            ProbeKind::MultiCore => "multi-core",
            ProbeKind::Gpu => "gpu",
        }
    }
}

impl std::fmt::Display for ProbeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

pub trait Probe {
    fn kind(&self) -> ProbeKind;

    /// Measure for `duration_ms` and return the probe's score
    fn run(&mut self, duration_ms: u64) -> BenchResult<u64>;
}

/// Latest instant at which a context group may still report
pub(crate) fn context_deadline(duration_ms: u64, warmup_ms: f64, grace: Duration) -> Instant {
    let budget = Duration::from_millis(duration_ms) + Duration::from_secs_f64(warmup_ms.max(0.0) / 1000.0);
    Instant::now() + budget + grace
}
