use crate::constants::kernel::{
    BATCH_SIZE, CACHE_WARMUP_MS, CACHE_WARM_ADD, CACHE_WARM_MUL, K1, K2, K3, OPS_PER_POINT, SEED,
    STEADY_WARMUP_MS, TOTAL_WARMUP_MS, UNROLL,
};
use crate::kernel::StopSignal;
use crate::time::{Clock, SharedClock};

/// Result of one kernel execution
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KernelOutcome {
    /// Transform applications completed inside the timed region
    pub operations: u64,
    /// Final accumulator value. Callers must consume it so the loop cannot be elided.
    pub checksum: f64,
    /// Length of the timed region as seen by the clock (warm-up excluded)
    pub measured_ms: f64,
}

impl KernelOutcome {
    pub fn score(&self) -> u64 {
        ops_to_score(self.operations)
    }
}

/// Raw operation count to score points, floor-rounded
pub fn ops_to_score(operations: u64) -> u64 {
    operations / OPS_PER_POINT
}

/// One application of the load transform
#[inline(always)]
pub fn transform(val: f64) -> f64 {
    let v = (val * K1).sin() * (val + K2).cos();
    (v * v + K3).sqrt()
}

/// Apply the transform BATCH_SIZE times
#[inline]
pub fn run_batch(mut val: f64) -> f64 {
    for _ in 0..BATCH_SIZE / UNROLL {
        val = transform(val);
        val = transform(val);
        val = transform(val);
        val = transform(val);
    }
    val
}

/// Two-stage warm-up; returns the accumulator to seed the timed region with
pub fn warm_up(clock: &dyn Clock, seed: f64) -> f64 {
    // Stage A: cheap recurrence, touches caches without full FPU load
    let cache_start = clock.now_ms();
    let mut dummy = seed;
    while clock.now_ms() - cache_start < CACHE_WARMUP_MS {
        dummy = dummy * CACHE_WARM_MUL + CACHE_WARM_ADD;
    }

    // Stage B: full intensity so the core clocks up and the scheduler settles
    let steady_start = clock.now_ms();
    while clock.now_ms() - steady_start < STEADY_WARMUP_MS {
        dummy = transform(dummy);
    }

    dummy
}

/// Timed region: whole batches until `duration_ms` has elapsed or `stop` is raised.
/// The clock and the stop signal are only checked between batches.
pub fn measure(clock: &dyn Clock, duration_ms: f64, seed: f64, stop: &StopSignal) -> KernelOutcome {
    let start = clock.now_ms();
    let mut operations = 0u64;
    let mut val = seed;
    let mut now = clock.now_ms();

    while now - start < duration_ms && !stop.is_raised() {
        val = run_batch(val);
        operations += BATCH_SIZE;
        now = clock.now_ms();
    }

    KernelOutcome {
        operations,
        checksum: val,
        measured_ms: now - start,
    }
}

/// Something an execution context can run for a fixed time
pub trait Workload: Send + Sync {
    /// Run for `duration_ms`, returning early once `stop` is raised
    fn execute(&self, duration_ms: f64, stop: &StopSignal) -> KernelOutcome;

    /// Time spent before the timed region starts
    fn warmup_ms(&self) -> f64 {
        0.0
    }
}

/// Production kernel: warm-up followed by the timed region
#[derive(Clone)]
pub struct ArithmeticKernel {
    clock: SharedClock,
    seed: f64,
}

impl ArithmeticKernel {
    pub fn new(clock: SharedClock) -> Self {
        Self { clock, seed: SEED }
    }

    pub fn with_seed(mut self, seed: f64) -> Self {
        self.seed = seed;
        self
    }
}

impl Workload for ArithmeticKernel {
    fn execute(&self, duration_ms: f64, stop: &StopSignal) -> KernelOutcome {
        let warmed = warm_up(self.clock.as_ref(), self.seed);
        let outcome = measure(self.clock.as_ref(), duration_ms, warmed, stop);
        log::debug!(
            "[kernel] {} ops in {:.1}ms (checksum {:.6})",
            outcome.operations,
            outcome.measured_ms,
            outcome.checksum
        );
        outcome
    }

    fn warmup_ms(&self) -> f64 {
        TOTAL_WARMUP_MS
    }
}
