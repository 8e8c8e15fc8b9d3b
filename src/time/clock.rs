use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Millisecond time source with an arbitrary origin
pub trait Clock: Send + Sync {
    /// Milliseconds elapsed since the clock's origin
    fn now_ms(&self) -> f64;
}

/// Clock handle passed across execution contexts
pub type SharedClock = Arc<dyn Clock>;

/// Wall clock backed by [`Instant`]
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }

    pub fn shared() -> SharedClock {
        Arc::new(Self::new())
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// Deterministic clock: every read returns the current time, then advances it by a fixed step.
///
/// The first read returns 0.
#[derive(Debug)]
pub struct SteppingClock {
    reads: AtomicU64,
    step_ms: f64,
}

impl SteppingClock {
    pub fn new(step_ms: f64) -> Self {
        Self {
            reads: AtomicU64::new(0),
            step_ms,
        }
    }

    /// Number of reads so far
    pub fn reads(&self) -> u64 {
        self.reads.load(Ordering::SeqCst)
    }
}

impl Clock for SteppingClock {
    fn now_ms(&self) -> f64 {
        let tick = self.reads.fetch_add(1, Ordering::SeqCst);
        tick as f64 * self.step_ms
    }
}

/// Clock that only moves when told to. Stored in microseconds.
#[derive(Debug, Default)]
pub struct ManualClock {
    now_us: AtomicU64,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance_ms(&self, ms: f64) {
        let delta = (ms * 1000.0).round().max(0.0) as u64;
        self.now_us.fetch_add(delta, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now_us.load(Ordering::SeqCst) as f64 / 1000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_monotonic_clock_advances() {
        let clock = MonotonicClock::new();
        let first = clock.now_ms();
        std::thread::sleep(Duration::from_millis(5));
        let second = clock.now_ms();
        assert!(second >= first + 4.0);
    }

    #[test]
    fn test_stepping_clock_sequence() {
        let clock = SteppingClock::new(100.0);
        assert_eq!(clock.now_ms(), 0.0);
        assert_eq!(clock.now_ms(), 100.0);
        assert_eq!(clock.now_ms(), 200.0);
        assert_eq!(clock.reads(), 3);
    }

    #[test]
    fn test_manual_clock() {
        let clock = ManualClock::new();
        assert_eq!(clock.now_ms(), 0.0);
        clock.advance_ms(16.5);
        assert!((clock.now_ms() - 16.5).abs() < 1e-9);
        clock.advance_ms(983.5);
        assert_eq!(clock.now_ms(), 1000.0);
    }
}
