// Titan Bench Constants - SINGLE SOURCE OF TRUTH
//
// Every tuned number used by the probes and the scoring table lives here.
// Changing any of these changes score comparability between runs.

/// Workload kernel constants
pub mod kernel {
    /// Accumulator seed for the warm-up stages
    pub const SEED: f64 = 1.5;

    /// Transform constants: val = sin(val*K1) * cos(val+K2); val = sqrt(val² + K3)
    pub const K1: f64 = 1.0001;
    pub const K2: f64 = 0.1;
    pub const K3: f64 = 1.1;

    /// Linear recurrence used by the cache warm-up stage
    pub const CACHE_WARM_MUL: f64 = 1.0001;
    pub const CACHE_WARM_ADD: f64 = 0.0001;

    /// Transform applications between two clock reads
    pub const BATCH_SIZE: u64 = 100_000;

    /// Manual unroll factor inside a batch (BATCH_SIZE must be a multiple)
    pub const UNROLL: u64 = 4;

    /// Warm-up stage budgets in milliseconds
    pub const CACHE_WARMUP_MS: f64 = 100.0;
    pub const STEADY_WARMUP_MS: f64 = 200.0;
    pub const TOTAL_WARMUP_MS: f64 = CACHE_WARMUP_MS + STEADY_WARMUP_MS;

    /// Raw operations per score point
    pub const OPS_PER_POINT: u64 = 1000;
}

/// Default probe durations in milliseconds
pub mod durations {
    pub const SINGLE_CORE_MS: u64 = 2500;
    pub const MULTI_CORE_MS: u64 = 3000;
    pub const GPU_MS: u64 = 3000;
}

/// Multi-core fan-out constants
pub mod multi_core {
    /// Thread count used when the system descriptor reports nothing
    pub const FALLBACK_THREADS: usize = 8;

    /// Delay between consecutive context start messages
    pub const STAGGER_MS: u64 = 5;

    /// Extra wait on top of duration + warm-up + stagger before abandoning contexts
    pub const GRACE_MS: u64 = 1500;

    /// Stack size for execution context threads
    pub const CONTEXT_STACK_SIZE: usize = 256 * 1024;
}

/// GPU probe constants
pub mod gpu {
    /// Off-screen surface dimensions
    pub const SURFACE_WIDTH: u32 = 640;
    pub const SURFACE_HEIGHT: u32 = 640;

    /// Per-pixel loop iterations in the stress shader (documentation only, the WGSL hardcodes it)
    pub const SHADER_ITERATIONS: u32 = 600;

    /// Reference frame time for a 60 Hz display
    pub const REFERENCE_FRAME_MS: f64 = 16.67;

    /// Empirical scale bringing GPU scores in line with the CPU probes
    pub const FPS_SCALE: f64 = 150.0;

    /// Upper bound for the frame pacing bonus
    pub const MAX_CONSISTENCY_FACTOR: f64 = 1.15;

    /// Default frame pacing rate
    pub const DEFAULT_REFRESH_HZ: f64 = 60.0;
}

/// Composite score weights
pub mod scoring {
    pub const SINGLE_WEIGHT: f64 = 10.0;
    pub const MULTI_WEIGHT: f64 = 0.5;
    pub const GPU_WEIGHT: f64 = 10.0;
}

/// Orchestrator progress checkpoints (percent)
pub mod progress {
    pub const SINGLE_CORE: u8 = 10;
    pub const MULTI_CORE: u8 = 40;
    pub const GPU: u8 = 70;
    pub const CALCULATING: u8 = 95;
    pub const COMPLETED: u8 = 100;
}

/// Default history file name
pub const DEFAULT_HISTORY_FILE: &str = "titan_bench_history.json";
