//! Frame clocks
//!
//! Engines never count frames. Every step receives a timestamp in
//! milliseconds and derives progress from elapsed time, so irregular frame
//! intervals only change how many intermediate states get drawn.

use std::time::Instant;

/// Source of frame timestamps in milliseconds
pub trait FrameClock {
    /// Current time in milliseconds since an arbitrary origin
    fn now_ms(&self) -> f64;
}

/// Wall clock backed by [`Instant`]
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock for SystemClock {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// Hand-advanced clock for headless runs and tests
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ManualClock {
    now_ms: f64,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start at a given timestamp
    pub fn starting_at(now_ms: f64) -> Self {
        Self { now_ms }
    }

    /// Advance by `delta_ms` and return the new timestamp
    pub fn advance(&mut self, delta_ms: f64) -> f64 {
        self.now_ms += delta_ms.max(0.0);
        self.now_ms
    }

    /// Jump to an absolute timestamp (never backwards)
    pub fn set(&mut self, now_ms: f64) {
        self.now_ms = self.now_ms.max(now_ms);
    }
}

impl FrameClock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now_ms
    }
}

/// Nominal frame interval for a refresh rate
#[inline]
pub fn frame_interval_ms(fps: u32) -> f64 {
    1000.0 / fps.max(1) as f64
}
