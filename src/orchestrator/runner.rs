use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::config::{BenchConfig, DurationConfig};
use crate::error::{BenchError, BenchResult};
use crate::orchestrator::{BenchmarkStatus, ProgressEvent};
use crate::probes::{GpuProbe, MultiCoreProbe, Probe, SingleCoreProbe};
use crate::scoring::{composite, CompositeResult, RawScores};
use crate::system_info::SystemDescriptor;
use crate::time::SharedClock;

pub type ProgressObserver = Box<dyn FnMut(&ProgressEvent)>;

/// Final record of a completed run
#[derive(Debug, Clone)]
pub struct BenchmarkReport {
    pub scores: RawScores,
    pub composite: CompositeResult,
    pub system: SystemDescriptor,
    pub completed_at: DateTime<Utc>,
}

pub struct Orchestrator {
    single_core: Box<dyn Probe>,
    multi_core: Box<dyn Probe>,
    /// None when the GPU phase is disabled; it then scores 0
    gpu: Option<Box<dyn Probe>>,
    durations: DurationConfig,
    system: SystemDescriptor,
    status: BenchmarkStatus,
    progress: u8,
    scores: RawScores,
    observers: Vec<ProgressObserver>,
}

impl Orchestrator {
    pub fn new(
        single_core: Box<dyn Probe>,
        multi_core: Box<dyn Probe>,
        gpu: Option<Box<dyn Probe>>,
        durations: DurationConfig,
        system: SystemDescriptor,
    ) -> Self {
        Self {
            single_core,
            multi_core,
            gpu,
            durations,
            system,
            status: BenchmarkStatus::Idle,
            progress: 0,
            scores: RawScores::default(),
            observers: Vec::new(),
        }
    }

    /// Production probes wired from configuration.
    ///
    /// The configured thread count wins over the system descriptor's.
    pub fn from_config(
        config: &BenchConfig,
        system: SystemDescriptor,
        clock: SharedClock,
    ) -> BenchResult<Self> {
        let threads = config.multi_core.threads.unwrap_or(system.threads);
        config.validate_for_threads(threads)?;

        let grace = Duration::from_millis(config.multi_core.grace_ms);
        let single_core = SingleCoreProbe::new(clock.clone()).with_grace(grace);
        let multi_core = MultiCoreProbe::new(clock.clone(), Some(threads))
            .with_stagger(Duration::from_millis(config.multi_core.stagger_ms))
            .with_grace(grace);
        let gpu = config.gpu.enabled.then(|| {
            Box::new(GpuProbe::new(
                clock,
                config.gpu.width,
                config.gpu.height,
                config.gpu.refresh_hz,
            )) as Box<dyn Probe>
        });

        Ok(Self::new(
            Box::new(single_core),
            Box::new(multi_core),
            gpu,
            config.durations,
            system,
        ))
    }

    pub fn on_progress(&mut self, observer: impl FnMut(&ProgressEvent) + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn status(&self) -> BenchmarkStatus {
        self.status
    }

    pub fn progress(&self) -> u8 {
        self.progress
    }

    /// Scores of the phases completed so far
    pub fn scores(&self) -> RawScores {
        self.scores
    }

    pub fn system(&self) -> &SystemDescriptor {
        &self.system
    }

    /// Run all phases to completion.
    ///
    /// Degraded probes score 0 and the run continues; any other failure moves
    /// the run to [`BenchmarkStatus::Error`] and is returned.
    pub fn run(&mut self) -> BenchResult<BenchmarkReport> {
        self.scores = RawScores::default();
        self.progress = 0;

        match self.execute() {
            Ok(report) => Ok(report),
            Err(error) => {
                log::error!("[Orchestrator] {}", error);
                self.transition(BenchmarkStatus::Error);
                Err(error)
            }
        }
    }

    fn execute(&mut self) -> BenchResult<BenchmarkReport> {
        self.transition(BenchmarkStatus::RunningCpuSingle);
        self.scores.cpu_single = run_probe(self.single_core.as_mut(), self.durations.single_ms)?;

        self.transition(BenchmarkStatus::RunningCpuMulti);
        self.scores.cpu_multi = run_probe(self.multi_core.as_mut(), self.durations.multi_ms)?;

        self.transition(BenchmarkStatus::RunningGpu);
        self.scores.gpu_score = match self.gpu.as_mut() {
            Some(probe) => run_probe(probe.as_mut(), self.durations.gpu_ms)?,
            None => {
                log::info!("[Orchestrator] GPU phase disabled, scoring 0");
                0
            }
        };

        self.transition(BenchmarkStatus::Calculating);
        let composite = composite(&self.scores);
        log::info!(
            "[Orchestrator] Composite {} ({}) from {:?}",
            composite.total,
            composite.tier.name,
            self.scores
        );

        let report = BenchmarkReport {
            scores: self.scores,
            composite,
            system: self.system.clone(),
            completed_at: Utc::now(),
        };
        self.transition(BenchmarkStatus::Completed);
        Ok(report)
    }

    fn transition(&mut self, status: BenchmarkStatus) {
        self.status = status;
        if let Some(progress) = status.progress() {
            self.progress = progress;
        }
        log::info!("[Orchestrator] {} ({}%)", status.message(), self.progress);

        let event = ProgressEvent {
            status,
            progress: self.progress,
            scores: self.scores,
        };
        for observer in self.observers.iter_mut() {
            observer(&event);
        }
    }
}

/// Run one probe, mapping degraded errors to 0 and everything else to `PhaseFailed`
fn run_probe(probe: &mut dyn Probe, duration_ms: u64) -> BenchResult<u64> {
    let kind = probe.kind();
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| probe.run(duration_ms)));

    match outcome {
        Ok(Ok(score)) => {
            log::info!("[Orchestrator] {} score: {}", kind, score);
            Ok(score)
        }
        Ok(Err(error)) if error.is_degraded_capability() => {
            log::warn!("[Orchestrator] {} degraded ({}), scoring 0", kind, error);
            Ok(0)
        }
        Ok(Err(error)) => Err(BenchError::PhaseFailed {
            phase: kind.name().to_string(),
            reason: error.to_string(),
        }),
        Err(payload) => Err(BenchError::PhaseFailed {
            phase: kind.name().to_string(),
            reason: panic_message(payload.as_ref()),
        }),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "panicked".to_string()
    }
}
