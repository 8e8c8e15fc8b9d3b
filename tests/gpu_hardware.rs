//! Real-adapter GPU probe run; skipped on machines without an adapter

use titan_bench::gpu::preferred_adapter_info;
use titan_bench::probes::GpuProbeState;
use titan_bench::{GpuProbe, MonotonicClock};

#[test]
fn test_gpu_probe_on_real_adapter_finishes() {
    if preferred_adapter_info().is_none() {
        eprintln!("No GPU adapter available, skipping");
        return;
    }

    let mut probe = GpuProbe::new(MonotonicClock::shared(), 64, 64, 0.0);
    let score = probe.measure(200);
    assert_eq!(probe.state(), GpuProbeState::Finished);
    if let Some(sample) = probe.last_sample() {
        assert_eq!(score, sample.score());
        assert!(sample.frames > 0);
    }
}
