//! GPU shader throughput probe
//!
//! Renders the stress shader frame after frame for a fixed duration and
//! turns frame count and frame pacing into a score:
//!
//! ```text
//! avg_fps            = frames / elapsed_ms * 1000
//! avg_frame_time_ms  = total_frame_time / frames      (16.67 when frames == 0)
//! consistency_factor = min(1.15, 16.67 / max(avg_frame_time_ms, 1))
//! score              = floor(avg_fps * 150 * consistency_factor)
//! ```

use std::time::{Duration, Instant};

use crate::constants::gpu::{FPS_SCALE, MAX_CONSISTENCY_FACTOR, REFERENCE_FRAME_MS};
use crate::error::BenchResult;
use crate::gpu::{pacer_for_refresh, FramePacer, FrameTarget, GpuContext, OffscreenTarget};
use crate::probes::{Probe, ProbeKind};
use crate::time::SharedClock;

/// Creates the frame target for one run (device, compiled pipeline, surface)
pub type TargetFactory = Box<dyn FnMut() -> BenchResult<Box<dyn FrameTarget>> + Send>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GpuProbeState {
    Uninit,
    /// Surface allocated and program compiled
    Ready,
    Rendering,
    /// Score computed (or abandoned with 0)
    Finished,
}

/// Raw counters of one render loop
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GpuSample {
    pub frames: u64,
    pub elapsed_ms: f64,
    /// Sum of inter-frame times, first frame excluded
    pub total_frame_time_ms: f64,
}

impl GpuSample {
    pub fn avg_fps(&self) -> f64 {
        if self.elapsed_ms > 0.0 {
            self.frames as f64 / self.elapsed_ms * 1000.0
        } else {
            0.0
        }
    }

    pub fn avg_frame_time_ms(&self) -> f64 {
        if self.frames > 0 {
            self.total_frame_time_ms / self.frames as f64
        } else {
            REFERENCE_FRAME_MS
        }
    }

    pub fn consistency_factor(&self) -> f64 {
        consistency_factor(self.avg_frame_time_ms())
    }

    pub fn score(&self) -> u64 {
        let score = self.avg_fps() * FPS_SCALE * self.consistency_factor();
        if score.is_finite() && score > 0.0 {
            score.floor() as u64
        } else {
            0
        }
    }
}

/// Frame pacing bonus, capped at 1.15
pub fn consistency_factor(avg_frame_time_ms: f64) -> f64 {
    (REFERENCE_FRAME_MS / avg_frame_time_ms.max(1.0)).min(MAX_CONSISTENCY_FACTOR)
}

pub struct GpuProbe {
    clock: SharedClock,
    factory: TargetFactory,
    pacer: Box<dyn FramePacer>,
    state: GpuProbeState,
    last_sample: Option<GpuSample>,
}

impl GpuProbe {
    /// Production probe: headless wgpu device, off-screen surface, paced at `refresh_hz`
    pub fn new(clock: SharedClock, width: u32, height: u32, refresh_hz: f64) -> Self {
        let factory: TargetFactory = Box::new(move || {
            let context = GpuContext::new_headless()?;
            let target = OffscreenTarget::new(context, width, height)?;
            Ok(Box::new(target) as Box<dyn FrameTarget>)
        });
        Self::with_target_factory(clock, factory, pacer_for_refresh(refresh_hz))
    }

    pub fn with_target_factory(
        clock: SharedClock,
        factory: TargetFactory,
        pacer: Box<dyn FramePacer>,
    ) -> Self {
        Self {
            clock,
            factory,
            pacer,
            state: GpuProbeState::Uninit,
            last_sample: None,
        }
    }

    pub fn state(&self) -> GpuProbeState {
        self.state
    }

    pub fn last_sample(&self) -> Option<GpuSample> {
        self.last_sample
    }

    /// Run the probe; any GPU failure scores 0
    pub fn measure(&mut self, duration_ms: u64) -> u64 {
        self.state = GpuProbeState::Uninit;
        self.last_sample = None;

        let mut target = match (self.factory)() {
            Ok(target) => target,
            Err(e) => {
                log::warn!("[GpuProbe] GPU unavailable, scoring 0: {}", e);
                self.state = GpuProbeState::Finished;
                return 0;
            }
        };
        self.state = GpuProbeState::Ready;

        let result = self.render_loop(target.as_mut(), duration_ms as f64);
        drop(target);
        self.state = GpuProbeState::Finished;

        match result {
            Ok(sample) => {
                let score = sample.score();
                log::info!(
                    "[GpuProbe] {} frames in {:.0}ms, {:.1} fps, {:.2}ms avg frame, consistency {:.3} -> score {}",
                    sample.frames,
                    sample.elapsed_ms,
                    sample.avg_fps(),
                    sample.avg_frame_time_ms(),
                    sample.consistency_factor(),
                    score
                );
                self.last_sample = Some(sample);
                score
            }
            Err(e) => {
                log::warn!("[GpuProbe] Rendering failed, scoring 0: {}", e);
                0
            }
        }
    }

    /// Termination is checked at the top of every iteration
    fn render_loop(&mut self, target: &mut dyn FrameTarget, duration_ms: f64) -> BenchResult<GpuSample> {
        self.state = GpuProbeState::Rendering;

        let start = self.clock.now_ms();
        // Real-time bound for the pacer; the loop itself runs on the injected clock
        let deadline = Instant::now() + Duration::from_secs_f64(duration_ms.max(0.0) / 1000.0);
        let mut last_frame = start;
        let mut frames = 0u64;
        let mut total_frame_time_ms = 0.0;

        loop {
            let now = self.clock.now_ms();
            let elapsed = now - start;

            if elapsed > duration_ms {
                return Ok(GpuSample {
                    frames,
                    elapsed_ms: elapsed,
                    total_frame_time_ms,
                });
            }

            // First frame is a pipeline warm-up outlier
            if frames > 0 {
                total_frame_time_ms += now - last_frame;
            }
            last_frame = now;

            target.render_frame((elapsed / 1000.0) as f32)?;
            frames += 1;

            self.pacer.wait_for_next_frame(deadline);
        }
    }
}

impl Probe for GpuProbe {
    fn kind(&self) -> ProbeKind {
        ProbeKind::Gpu
    }

    fn run(&mut self, duration_ms: u64) -> BenchResult<u64> {
        Ok(self.measure(duration_ms))
    }
}
