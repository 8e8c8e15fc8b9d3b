//! GPU backend for the shader throughput probe
//!
//! Headless wgpu device, the fixed-cost stress shader, an off-screen render
//! target and the frame pacing primitive.

pub mod context;
pub mod error;
pub mod pacing;
pub mod target;

pub use context::{preferred_adapter_info, GpuContext};
pub use error::{check_error_scope, gpu_operation_error, GpuResult};
pub use pacing::{pacer_for_refresh, FramePacer, IntervalPacer, UnpacedPacer};
pub use target::{FrameTarget, FrameUniforms, OffscreenTarget};
