use std::sync::Arc;
use std::time::Duration;

use crate::constants::multi_core::{FALLBACK_THREADS, GRACE_MS, STAGGER_MS};
use crate::error::BenchResult;
use crate::kernel::{ops_to_score, ArithmeticKernel, Workload};
use crate::probes::{context_deadline, ContextGroup, Probe, ProbeKind};
use crate::time::SharedClock;

/// Outcome of one multi-core measurement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MultiCoreSample {
    pub score: u64,
    pub operations: u64,
    pub threads: usize,
    pub reported: usize,
    pub failed_to_start: usize,
    pub crashed: usize,
    pub timed_out: usize,
}

/// Runs one kernel instance per context, all concurrently, and sums their operations
pub struct MultiCoreProbe {
    workload: Arc<dyn Workload>,
    threads: usize,
    stagger: Duration,
    grace: Duration,
}

impl MultiCoreProbe {
    /// `threads` comes from the system descriptor; `None` or 0 falls back to 8
    pub fn new(clock: SharedClock, threads: Option<usize>) -> Self {
        Self::with_workload(Arc::new(ArithmeticKernel::new(clock)), threads)
    }

    pub fn with_workload(workload: Arc<dyn Workload>, threads: Option<usize>) -> Self {
        Self {
            workload,
            threads: resolve_thread_count(threads),
            stagger: Duration::from_millis(STAGGER_MS),
            grace: Duration::from_millis(GRACE_MS),
        }
    }

    pub fn with_stagger(mut self, stagger: Duration) -> Self {
        self.stagger = stagger;
        self
    }

    pub fn with_grace(mut self, grace: Duration) -> Self {
        self.grace = grace;
        self
    }

    pub fn threads(&self) -> usize {
        self.threads
    }

    pub fn measure(&self, duration_ms: u64) -> MultiCoreSample {
        log::info!(
            "[MultiCoreProbe] Launching {} contexts, {}ms stagger",
            self.threads,
            self.stagger.as_millis()
        );

        let group = ContextGroup::spawn(self.threads, Arc::clone(&self.workload));
        group.start(duration_ms as f64, self.stagger);

        // The bound starts once the last context has its start message
        let deadline = context_deadline(duration_ms, self.workload.warmup_ms(), self.grace);
        let collection = group.collect(deadline);

        let operations = collection.total_operations();
        let sample = MultiCoreSample {
            score: ops_to_score(operations),
            operations,
            threads: self.threads,
            reported: collection.reported(),
            failed_to_start: collection.failed_to_start,
            crashed: collection.crashed,
            timed_out: collection.timed_out,
        };

        if sample.reported < self.threads {
            log::warn!(
                "[MultiCoreProbe] Partial aggregate: {}/{} contexts reported ({} failed to start, {} crashed, {} timed out)",
                sample.reported,
                self.threads,
                sample.failed_to_start,
                sample.crashed,
                sample.timed_out
            );
        }
        log::info!("[MultiCoreProbe] {} ops -> score {}", operations, sample.score);

        sample
    }
}

impl Probe for MultiCoreProbe {
    fn kind(&self) -> ProbeKind {
        ProbeKind::MultiCore
    }

    fn run(&mut self, duration_ms: u64) -> BenchResult<u64> {
        Ok(self.measure(duration_ms).score)
    }
}

fn resolve_thread_count(threads: Option<usize>) -> usize {
    match threads {
        Some(count) if count > 0 => count,
        _ => FALLBACK_THREADS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::{KernelOutcome, StopSignal};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Instant;

    struct FixedWorkload(u64);

    impl Workload for FixedWorkload {
        fn execute(&self, _duration_ms: f64, _stop: &StopSignal) -> KernelOutcome {
            KernelOutcome {
                operations: self.0,
                checksum: 0.5,
                measured_ms: 0.0,
            }
        }
    }

    /// First context hangs far past any deadline and ignores cancellation
    struct FirstHangs {
        calls: AtomicUsize,
    }

    impl Workload for FirstHangs {
        fn execute(&self, _duration_ms: f64, _stop: &StopSignal) -> KernelOutcome {
            if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
                std::thread::sleep(Duration::from_secs(3));
            }
            KernelOutcome {
                operations: 5_000,
                checksum: 0.5,
                measured_ms: 0.0,
            }
        }
    }

    #[test]
    fn test_thread_count_fallback() {
        let probe = MultiCoreProbe::with_workload(Arc::new(FixedWorkload(1)), None);
        assert_eq!(probe.threads(), FALLBACK_THREADS);
        let probe = MultiCoreProbe::with_workload(Arc::new(FixedWorkload(1)), Some(0));
        assert_eq!(probe.threads(), FALLBACK_THREADS);
        let probe = MultiCoreProbe::with_workload(Arc::new(FixedWorkload(1)), Some(3));
        assert_eq!(probe.threads(), 3);
    }

    #[test]
    fn test_aggregate_sums_all_contexts() {
        let probe = MultiCoreProbe::with_workload(Arc::new(FixedWorkload(2_500)), Some(4));
        let sample = probe.measure(10);
        assert_eq!(sample.operations, 10_000);
        assert_eq!(sample.score, 10);
        assert_eq!(sample.reported, 4);
    }

    #[test]
    fn test_score_non_decreasing_in_threads() {
        let mut last = 0;
        for threads in 1..=6 {
            let mut probe =
                MultiCoreProbe::with_workload(Arc::new(FixedWorkload(1_000)), Some(threads))
                    .with_stagger(Duration::ZERO);
            let score = probe.run(10).unwrap();
            assert!(score >= last);
            last = score;
        }
        assert_eq!(last, 6);
    }

    #[test]
    fn test_hung_context_is_abandoned() {
        let probe = MultiCoreProbe::with_workload(
            Arc::new(FirstHangs {
                calls: AtomicUsize::new(0),
            }),
            Some(3),
        )
        .with_grace(Duration::from_millis(100));

        let started = Instant::now();
        let sample = probe.measure(10);
        assert!(started.elapsed() < Duration::from_secs(2));
        assert_eq!(sample.reported, 2);
        assert_eq!(sample.timed_out, 1);
        assert_eq!(sample.score, 10);
    }

    #[test]
    fn test_stagger_small_relative_to_duration() {
        let probe = MultiCoreProbe::with_workload(Arc::new(FixedWorkload(1_000)), Some(4));
        let started = Instant::now();
        probe.measure(10);
        // 3 gaps of 5ms
        assert!(started.elapsed() >= Duration::from_millis(15));
        assert!(started.elapsed() < Duration::from_secs(1));
    }
}
