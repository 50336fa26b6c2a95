//! Wheel outcome: rotation draw, landing segment, result

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use lg_core::FULL_TURN_DEG;

use crate::config::Segment;

/// Full turns every spin makes before the residual offset
pub const MIN_FULL_TURNS: f64 = 4.0;

/// Smallest total rotation a spin can draw (degrees)
pub const MIN_TOTAL_ROTATION_DEG: f64 = MIN_FULL_TURNS * FULL_TURN_DEG;

/// Upper bound (exclusive) of the total rotation draw (degrees)
pub const MAX_TOTAL_ROTATION_DEG: f64 = MIN_TOTAL_ROTATION_DEG + FULL_TURN_DEG;

/// Draw a total rotation uniformly from `[1440°, 1800°)`
pub fn draw_total_rotation<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    MIN_TOTAL_ROTATION_DEG + rng.random::<f64>() * FULL_TURN_DEG
}

/// Segment under the pointer once the wheel has turned `total_rotation_deg`.
///
/// Segments are laid out from angle 0 in increasing order and the pointer
/// stays still, so a growing rotation walks the pointer backwards through
/// the indices.
pub fn landing_segment(total_rotation_deg: f64, segment_count: usize) -> usize {
    let count = segment_count.max(1);
    let final_angle = total_rotation_deg.rem_euclid(FULL_TURN_DEG);
    let arc = FULL_TURN_DEG / count as f64;
    ((FULL_TURN_DEG - final_angle) / arc).floor() as usize % count
}

/// Result of one wheel spin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpinResult {
    /// Index into the configuration's segments
    pub segment_index: usize,
    /// Copy of the landing segment
    pub segment: Segment,
    /// Rotation the wheel finished at (degrees)
    pub total_rotation_deg: f64,
}

impl fmt::Display for SpinResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Result: {}", self.segment.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_exact_four_turns_lands_on_first() {
        // finalAngle = 0 -> floor(360 / 90) mod 4 = 0
        assert_eq!(landing_segment(1440.0, 4), 0);
    }

    #[test]
    fn test_landing_walks_backwards() {
        assert_eq!(landing_segment(1440.0 + 10.0, 4), 3);
        assert_eq!(landing_segment(1440.0 + 100.0, 4), 2);
        assert_eq!(landing_segment(1440.0 + 190.0, 4), 1);
        assert_eq!(landing_segment(1440.0 + 280.0, 4), 0);
    }

    #[test]
    fn test_landing_on_boundary() {
        // 90° residual: (360 - 90) / 90 = 3 exactly
        assert_eq!(landing_segment(1440.0 + 90.0, 4), 3);
        assert_eq!(landing_segment(1440.0 + 270.0, 4), 1);
    }

    #[test]
    fn test_single_segment() {
        for angle in [1440.0, 1500.5, 1799.9] {
            assert_eq!(landing_segment(angle, 1), 0);
        }
    }

    #[test]
    fn test_landing_always_in_bounds() {
        let mut rng = StdRng::seed_from_u64(99);
        for count in 1..=24 {
            for _ in 0..200 {
                let total = draw_total_rotation(&mut rng);
                assert!(landing_segment(total, count) < count);
            }
        }
    }

    #[test]
    fn test_draw_range() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..10_000 {
            let total = draw_total_rotation(&mut rng);
            assert!(total >= MIN_TOTAL_ROTATION_DEG);
            assert!(total < MAX_TOTAL_ROTATION_DEG);
        }
    }

    #[test]
    fn test_display() {
        let result = SpinResult {
            segment_index: 1,
            segment: Segment::new("2", "Prize 2", "#4ECDC4"),
            total_rotation_deg: 1530.0,
        };
        assert_eq!(result.to_string(), "Result: Prize 2");
    }
}
