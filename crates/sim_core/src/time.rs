//! Injectable clocks for weapon rate limiting.
//!
//! The simulation never reads wall-clock time directly: whoever drives the
//! session supplies a [`Clock`]. Real-time drivers hand in a
//! [`MonotonicClock`]; tests and headless drivers advance a [`ManualClock`]
//! in lockstep with simulated time.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// A monotonic source of elapsed seconds.
pub trait Clock: Send + Sync {
    /// Seconds elapsed on this clock. Must never decrease.
    fn now(&self) -> f64;
}

/// Wall-clock backed [`Clock`] counting from its construction.
#[derive(Debug)]
pub struct MonotonicClock {
    start: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }
}

/// A [`Clock`] driven by hand, in microsecond steps.
///
/// Clones share the same underlying counter, so a driver can keep one handle
/// for advancing time and give another to the session.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    micros: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the clock by `seconds` (negative amounts are ignored).
    pub fn advance(&self, seconds: f64) {
        if seconds <= 0.0 {
            return;
        }
        let step = (seconds * 1_000_000.0).round() as u64;
        self.micros.fetch_add(step, Ordering::Relaxed);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 {
        self.micros.load(Ordering::Relaxed) as f64 / 1_000_000.0
    }
}
