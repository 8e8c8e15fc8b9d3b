//! Workload kernel
//!
//! The arithmetic load shared by the single- and multi-core probes: a
//! branchless, data-dependent floating point transform applied in fixed-size
//! batches, preceded by a two-stage warm-up.

pub mod stop;
pub mod workload;

pub use stop::StopSignal;
pub use workload::{
    measure, ops_to_score, run_batch, transform, warm_up, ArithmeticKernel, KernelOutcome, Workload,
};
