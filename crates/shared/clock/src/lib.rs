//! Bourse Clock Infrastructure
//!
//! Every history series in the market is indexed by *elapsed seconds since the
//! simulation started*. The [`Clock`] trait is the single source of that value.
//!
//! ## Usage
//!
//! ```ignore
//! use bourse_clock::{Clock, TimeScale, WorldClock};
//! use std::time::Duration;
//!
//! // Real-time clock, starts at 0.0
//! let live = WorldClock::new();
//!
//! // Frozen clock for deterministic tests, moved by hand
//! let world = WorldClock::with_scale(TimeScale::Fixed);
//! world.advance(Duration::from_millis(1500));
//! assert_eq!(world.elapsed_secs(), 1.5);
//! ```

mod world;

pub use world::{TimeScale, WorldClock};

/// Port for elapsed simulation time
///
/// Real time for live runs, fixed time for deterministic tests.
pub trait Clock: Send + Sync {
    /// Seconds elapsed since the simulation started
    fn elapsed_secs(&self) -> f64;

    /// Get the clock's name/identifier for debugging
    fn name(&self) -> &str {
        "Clock"
    }
}
