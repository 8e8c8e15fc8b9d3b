//! Frame pacing
//!
//! The GPU probe calls [`FramePacer::wait_for_next_frame`] after each frame
//! to wait for the next display-refresh tick or the end of its time budget,
//! whichever comes first. Termination is decided by the probe loop, never by
//! the pacer.

use std::time::{Duration, Instant};

pub trait FramePacer: Send {
    /// Block until the next frame slot, returning no later than `deadline`
    fn wait_for_next_frame(&mut self, deadline: Instant);
}

/// Sleeps until the next tick of a fixed refresh grid
#[derive(Debug)]
pub struct IntervalPacer {
    interval: Duration,
    origin: Option<Instant>,
}

impl IntervalPacer {
    pub fn new(refresh_hz: f64) -> Self {
        Self {
            interval: Duration::from_secs_f64(1.0 / refresh_hz),
            origin: None,
        }
    }

    /// First tick strictly after `now`
    fn next_tick(&mut self, now: Instant) -> Instant {
        let origin = *self.origin.get_or_insert(now);
        let elapsed = now.duration_since(origin).as_nanos();
        let interval = self.interval.as_nanos().max(1);
        let ticks = elapsed / interval + 1;
        origin + Duration::from_nanos((ticks * interval) as u64)
    }
}

impl FramePacer for IntervalPacer {
    fn wait_for_next_frame(&mut self, deadline: Instant) {
        let now = Instant::now();
        let wake = self.next_tick(now).min(deadline);
        std::thread::sleep(wake.saturating_duration_since(now));
    }
}

/// No pacing: the next frame starts as soon as the previous one finished
#[derive(Debug, Default, Clone, Copy)]
pub struct UnpacedPacer;

impl FramePacer for UnpacedPacer {
    fn wait_for_next_frame(&mut self, _deadline: Instant) {}
}

/// Pacer for a refresh rate; 0 or negative disables pacing
pub fn pacer_for_refresh(refresh_hz: f64) -> Box<dyn FramePacer> {
    if refresh_hz > 0.0 {
        Box::new(IntervalPacer::new(refresh_hz))
    } else {
        Box::new(UnpacedPacer)
    }
}
