//! Shared deceleration curve and progress helpers
//!
//! Both widgets run their spins through [`ease_out_cubic`] so the wheel and
//! the reels slow into their stop the same way.

/// Cubic ease-out: fast start, slow stop.
///
/// Input is clamped to `[0, 1]`; `0 → 0` and `1 → 1` exactly.
#[inline]
pub fn ease_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

/// Normalized progress of an animation, `min(elapsed / duration, 1)`.
///
/// Negative elapsed time (a frame timestamp older than the start) counts as
/// zero. A non-positive duration is already finished.
#[inline]
pub fn progress(elapsed_ms: f64, duration_ms: f64) -> f64 {
    if duration_ms <= 0.0 {
        return 1.0;
    }
    (elapsed_ms.max(0.0) / duration_ms).min(1.0)
}

/// Eased progress at `elapsed_ms` into an animation of `duration_ms`.
#[inline]
pub fn eased_progress(elapsed_ms: f64, duration_ms: f64) -> f64 {
    ease_out_cubic(progress(elapsed_ms, duration_ms))
}
