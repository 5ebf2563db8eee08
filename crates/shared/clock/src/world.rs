use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

use crate::Clock;

/// How the world clock moves
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum TimeScale {
    /// Follows the tokio clock (1:1 with wall time unless the runtime is paused)
    #[default]
    Normal,
    /// Only advances when explicitly moved
    Fixed,
}

/// Universal simulation clock - the source of truth for elapsed time
///
/// Built on `tokio::time::Instant`, so a paused tokio runtime (`test-util`)
/// also freezes this clock in `Normal` mode.
pub struct WorldClock {
    scale: TimeScale,
    started: Instant,
    /// Time added by `advance`
    offset: Mutex<Duration>,
}

impl WorldClock {
    /// Create a new world clock starting at elapsed time zero
    pub fn new() -> Arc<Self> {
        Self::with_scale(TimeScale::Normal)
    }

    pub fn with_scale(scale: TimeScale) -> Arc<Self> {
        Arc::new(Self {
            scale,
            started: Instant::now(),
            offset: Mutex::new(Duration::ZERO),
        })
    }

    /// Advance the simulated time by a specified duration
    ///
    /// The only way a `Fixed` clock moves. A `Normal` clock is shifted forward.
    pub fn advance(&self, duration: Duration) {
        *self.offset.lock() += duration;
    }

    /// Elapsed simulated time
    pub fn elapsed(&self) -> Duration {
        let offset = *self.offset.lock();
        match self.scale {
            TimeScale::Normal => self.started.elapsed() + offset,
            TimeScale::Fixed => offset,
        }
    }
}

impl Clock for WorldClock {
    fn elapsed_secs(&self) -> f64 {
        self.elapsed().as_secs_f64()
    }

    fn name(&self) -> &str {
        match self.scale {
            TimeScale::Normal => "WorldClock",
            TimeScale::Fixed => "WorldClock(fixed)",
        }
    }
}
