//! Reel timing: staggered starts, lengthening durations, completion wait

use serde::{Deserialize, Serialize};

/// Vertical size of one symbol cell
pub const SYMBOL_HEIGHT: f64 = 100.0;

/// Full passes over a reel strip before it settles
pub const FULL_PASSES: u32 = 5;

/// Delay between consecutive reel starts (ms)
pub const REEL_STAGGER_MS: f64 = 200.0;

/// Extra duration per ms of start delay
pub const REEL_SPEED_MULTIPLIER: f64 = 1.2;

/// Timing of every reel in one spin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReelTiming {
    /// Configured spin duration (ms)
    pub spin_duration_ms: f64,

    /// Delay between reel starts (ms)
    pub reel_stagger_ms: f64,

    /// Duration added per ms of delay
    pub speed_multiplier: f64,
}

impl ReelTiming {
    pub fn new(spin_duration_ms: f64) -> Self {
        Self {
            spin_duration_ms,
            reel_stagger_ms: REEL_STAGGER_MS,
            speed_multiplier: REEL_SPEED_MULTIPLIER,
        }
    }

    /// When reel `reel` starts moving, relative to the spin start
    pub fn reel_delay(&self, reel: usize) -> f64 {
        reel as f64 * self.reel_stagger_ms
    }

    /// How long reel `reel` moves once started
    pub fn reel_duration(&self, reel: usize) -> f64 {
        self.spin_duration_ms + self.reel_delay(reel) * self.speed_multiplier
    }

    /// When reel `reel` comes to rest, relative to the spin start
    pub fn reel_stop(&self, reel: usize) -> f64 {
        self.reel_delay(reel) + self.reel_duration(reel)
    }

    /// When the result is reported, relative to the spin start.
    ///
    /// This is a fixed wait, not the stop time of the slowest reel: with two
    /// or more reels the last reels are still settling when it elapses.
    pub fn completion_wait(&self, reel_count: usize) -> f64 {
        self.spin_duration_ms + reel_count as f64 * self.reel_stagger_ms
    }

    /// When the slowest reel comes to rest
    pub fn last_reel_stop(&self, reel_count: usize) -> f64 {
        (0..reel_count)
            .map(|reel| self.reel_stop(reel))
            .fold(0.0, f64::max)
    }
}

impl Default for ReelTiming {
    fn default() -> Self {
        Self::new(3000.0)
    }
}
