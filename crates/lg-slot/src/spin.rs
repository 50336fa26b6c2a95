//! Slot outcome: per-reel stop draw, win check, result

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use lg_core::{LgError, LgResult};

use crate::config::{SlotConfig, SlotSymbol};

/// Draw one stop index per reel, uniformly over each reel's length
pub fn draw_stops<R: Rng + ?Sized>(rng: &mut R, config: &SlotConfig) -> Vec<usize> {
    config
        .reels
        .iter()
        .map(|reel| rng.random_range(0..reel.len()))
        .collect()
}

/// Check externally chosen stops against a configuration
pub fn check_stops(config: &SlotConfig, stops: &[usize]) -> LgResult<()> {
    if stops.len() != config.reel_count() {
        return Err(LgError::InvalidOutcome(format!(
            "{} stops for {} reels",
            stops.len(),
            config.reel_count()
        )));
    }
    for (reel, (&stop, symbols)) in stops.iter().zip(&config.reels).enumerate() {
        if stop >= symbols.len() {
            return Err(LgError::InvalidOutcome(format!(
                "stop {} on reel {} with {} symbols",
                stop,
                reel,
                symbols.len()
            )));
        }
    }
    Ok(())
}

/// All symbols share the first symbol's id
pub fn is_winning_combination(combination: &[SlotSymbol]) -> bool {
    combination
        .first()
        .is_some_and(|first| combination.iter().all(|s| s.id == first.id))
}

/// Result of one slot spin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotResult {
    /// Selected symbol per reel
    pub combination: Vec<SlotSymbol>,
    /// Stop index per reel
    pub stops: Vec<usize>,
    pub is_win: bool,
}

impl SlotResult {
    /// Build the result for a set of stops (already checked)
    pub fn from_stops(config: &SlotConfig, stops: &[usize]) -> Self {
        let combination: Vec<SlotSymbol> = config
            .reels
            .iter()
            .zip(stops)
            .map(|(reel, &stop)| reel[stop].clone())
            .collect();
        let is_win = is_winning_combination(&combination);

        Self {
            combination,
            stops: stops.to_vec(),
            is_win,
        }
    }

    pub fn headline(&self) -> &'static str {
        if self.is_win {
            "🎉 Winner! 🎉"
        } else {
            "Try Again!"
        }
    }

    /// Symbol texts joined by spaces
    pub fn combination_text(&self) -> String {
        self.combination
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for SlotResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n{}", self.headline(), self.combination_text())
    }
}
