use std::sync::Arc;
use std::time::Duration;

use crate::constants::multi_core::GRACE_MS;
use crate::error::BenchResult;
use crate::kernel::{ops_to_score, ArithmeticKernel, Workload};
use crate::probes::{context_deadline, ContextGroup, Probe, ProbeKind};
use crate::time::SharedClock;

/// Runs one kernel instance in its own execution context
pub struct SingleCoreProbe {
    workload: Arc<dyn Workload>,
    grace: Duration,
}

impl SingleCoreProbe {
    pub fn new(clock: SharedClock) -> Self {
        Self::with_workload(Arc::new(ArithmeticKernel::new(clock)))
    }

    pub fn with_workload(workload: Arc<dyn Workload>) -> Self {
        Self {
            workload,
            grace: Duration::from_millis(GRACE_MS),
        }
    }

    pub fn with_grace(mut self, grace: Duration) -> Self {
        self.grace = grace;
        self
    }

    /// Score for `duration_ms` of measured time; 0 if the context never reports
    pub fn measure(&self, duration_ms: u64) -> u64 {
        let group = ContextGroup::spawn(1, Arc::clone(&self.workload));
        if group.is_empty() {
            log::warn!("[SingleCoreProbe] Execution context failed to start, scoring 0");
            return 0;
        }

        group.start(duration_ms as f64, Duration::ZERO);
        let deadline = context_deadline(duration_ms, self.workload.warmup_ms(), self.grace);
        let collection = group.collect(deadline);

        if collection.reported() == 0 {
            log::warn!("[SingleCoreProbe] Execution context did not report, scoring 0");
        }

        let score = ops_to_score(collection.total_operations());
        log::info!("[SingleCoreProbe] {} ops -> score {}", collection.total_operations(), score);
        score
    }
}

impl Probe for SingleCoreProbe {
    fn kind(&self) -> ProbeKind {
        ProbeKind::SingleCore
    }

    fn run(&mut self, duration_ms: u64) -> BenchResult<u64> {
        Ok(self.measure(duration_ms))
    }
}
