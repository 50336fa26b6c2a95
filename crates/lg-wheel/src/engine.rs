//! Wheel spin engine: frame stepping and result reporting

use rand::SeedableRng;
use rand::rngs::StdRng;

use lg_core::{LgError, LgResult, deg_to_rad, ease_out_cubic, progress};

use crate::config::WheelConfig;
use crate::spin::{SpinResult, draw_total_rotation, landing_segment};

/// Completion callback, invoked once per finished spin
pub type SpinCallback = Box<dyn FnMut(SpinResult)>;

/// Timed rotation from 0 to a drawn total.
///
/// Pure: the same animation stepped at the same timestamp always yields the
/// same frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelAnimation {
    pub start_ms: f64,
    pub duration_ms: f64,
    pub total_rotation_deg: f64,
}

/// Visual state of the wheel at one instant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelFrame {
    /// Linear progress in `[0, 1]`
    pub progress: f64,
    pub rotation_deg: f64,
    pub rotation_rad: f64,
    pub finished: bool,
}

impl WheelAnimation {
    pub fn new(start_ms: f64, duration_ms: f64, total_rotation_deg: f64) -> Self {
        Self {
            start_ms,
            duration_ms,
            total_rotation_deg,
        }
    }

    /// Frame at `now_ms`
    pub fn step(&self, now_ms: f64) -> WheelFrame {
        let t = progress(now_ms - self.start_ms, self.duration_ms);
        let rotation_deg = self.total_rotation_deg * ease_out_cubic(t);
        WheelFrame {
            progress: t,
            rotation_deg,
            rotation_rad: deg_to_rad(rotation_deg),
            finished: t >= 1.0,
        }
    }

    pub fn end_ms(&self) -> f64 {
        self.start_ms + self.duration_ms
    }
}

/// What a spin request did
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpinStart {
    /// A new spin is running toward this total rotation
    Started { total_rotation_deg: f64 },
    /// A spin was already in flight; nothing changed
    Ignored,
}

impl SpinStart {
    pub fn is_started(&self) -> bool {
        matches!(self, SpinStart::Started { .. })
    }
}

#[derive(Debug, Clone)]
struct ActiveSpin {
    config: WheelConfig,
    animation: WheelAnimation,
}

/// Prize wheel spin engine
///
/// The host calls [`spin`](Self::spin) on user input and
/// [`tick`](Self::tick) once per display frame with the frame timestamp.
/// The completion callback fires from inside the tick that reaches the end
/// of the animation.
pub struct WheelSpinEngine {
    rng: StdRng,
    on_complete: SpinCallback,
    active: Option<ActiveSpin>,
    /// Current rotation (radians)
    rotation: f64,
    spin_count: u64,
}

impl WheelSpinEngine {
    pub fn new(on_complete: impl FnMut(SpinResult) + 'static) -> Self {
        Self {
            rng: StdRng::from_os_rng(),
            on_complete: Box::new(on_complete),
            active: None,
            rotation: 0.0,
            spin_count: 0,
        }
    }

    /// Engine with a reproducible outcome sequence
    pub fn with_seed(seed: u64, on_complete: impl FnMut(SpinResult) + 'static) -> Self {
        let mut engine = Self::new(on_complete);
        engine.seed(seed);
        engine
    }

    /// Seed RNG for reproducible results
    pub fn seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    /// Start a spin with a random total rotation
    pub fn spin(&mut self, config: &WheelConfig, now_ms: f64) -> LgResult<SpinStart> {
        if self.is_spinning() {
            log::debug!("Wheel spin requested while spinning, ignored");
            return Ok(SpinStart::Ignored);
        }
        config.validate()?;

        let total = draw_total_rotation(&mut self.rng);
        Ok(self.start(config, now_ms, total))
    }

    /// Start a spin toward a chosen total rotation (degrees)
    pub fn spin_forced(
        &mut self,
        config: &WheelConfig,
        now_ms: f64,
        total_rotation_deg: f64,
    ) -> LgResult<SpinStart> {
        if self.is_spinning() {
            log::debug!("Forced wheel spin requested while spinning, ignored");
            return Ok(SpinStart::Ignored);
        }
        config.validate()?;

        if !total_rotation_deg.is_finite() || total_rotation_deg < 0.0 {
            return Err(LgError::InvalidOutcome(format!(
                "total rotation {}°",
                total_rotation_deg
            )));
        }

        log::debug!("Forcing wheel rotation to {:.2}°", total_rotation_deg);
        Ok(self.start(config, now_ms, total_rotation_deg))
    }

    fn start(&mut self, config: &WheelConfig, now_ms: f64, total_rotation_deg: f64) -> SpinStart {
        self.spin_count += 1;
        self.rotation = 0.0;

        let animation =
            WheelAnimation::new(now_ms, config.spin_duration as f64, total_rotation_deg);
        log::debug!(
            "Wheel spin #{} started: {:.2}° over {}ms, {} segments",
            self.spin_count,
            total_rotation_deg,
            config.spin_duration,
            config.segment_count()
        );

        self.active = Some(ActiveSpin {
            config: config.clone(),
            animation,
        });

        SpinStart::Started { total_rotation_deg }
    }

    /// Advance to `now_ms`. Returns the frame to draw, or `None` when idle.
    pub fn tick(&mut self, now_ms: f64) -> Option<WheelFrame> {
        let frame = self.active.as_ref()?.animation.step(now_ms);
        self.rotation = frame.rotation_rad;
        log::trace!(
            "Wheel frame: t={:.3} rotation={:.2}°",
            frame.progress,
            frame.rotation_deg
        );

        if frame.finished {
            if let Some(spin) = self.active.take() {
                self.finish(spin);
            }
        }

        Some(frame)
    }

    fn finish(&mut self, spin: ActiveSpin) {
        let total = spin.animation.total_rotation_deg;
        let segment_index = landing_segment(total, spin.config.segment_count());
        let segment = spin.config.segments[segment_index].clone();

        log::info!(
            "Wheel spin #{} landed on segment {} ('{}')",
            self.spin_count,
            segment_index,
            segment.text
        );

        (self.on_complete)(SpinResult {
            segment_index,
            segment,
            total_rotation_deg: total,
        });
    }

    /// Is a spin in flight?
    pub fn is_spinning(&self) -> bool {
        self.active.is_some()
    }

    /// Current rotation (radians) for the paint step
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    /// Animation of the spin in flight
    pub fn animation(&self) -> Option<&WheelAnimation> {
        self.active.as_ref().map(|spin| &spin.animation)
    }

    pub fn spin_count(&self) -> u64 {
        self.spin_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recording_engine() -> (WheelSpinEngine, Rc<RefCell<Vec<SpinResult>>>) {
        let results = Rc::new(RefCell::new(Vec::new()));
        let sink = results.clone();
        let engine = WheelSpinEngine::with_seed(42, move |r| sink.borrow_mut().push(r));
        (engine, results)
    }

    #[test]
    fn test_animation_step() {
        let anim = WheelAnimation::new(100.0, 3000.0, 1440.0);

        let start = anim.step(100.0);
        assert_eq!(start.rotation_deg, 0.0);
        assert!(!start.finished);

        let half = anim.step(1600.0);
        assert_relative_eq!(half.rotation_deg, 1440.0 * 0.875);

        let end = anim.step(3100.0);
        assert!(end.finished);
        assert_eq!(end.rotation_deg, 1440.0);
        assert_relative_eq!(end.rotation_rad, 8.0 * std::f64::consts::PI);

        let late = anim.step(9000.0);
        assert_eq!(late, end);
    }

    #[test]
    fn test_frame_before_start_is_at_rest() {
        let anim = WheelAnimation::new(1000.0, 3000.0, 1500.0);
        assert_eq!(anim.step(500.0).rotation_deg, 0.0);
    }

    #[test]
    fn test_rejects_empty_wheel() {
        let (mut engine, results) = recording_engine();
        let config = WheelConfig {
            segments: vec![],
            ..WheelConfig::stock()
        };
        assert!(matches!(
            engine.spin(&config, 0.0),
            Err(LgError::EmptySegments)
        ));
        assert!(!engine.is_spinning());
        assert!(engine.tick(16.0).is_none());
        assert!(results.borrow().is_empty());
    }

    #[test]
    fn test_second_spin_is_ignored() {
        let (mut engine, results) = recording_engine();
        let config = WheelConfig::stock();

        let first = engine.spin(&config, 0.0).unwrap();
        let SpinStart::Started { total_rotation_deg } = first else {
            panic!("first spin should start");
        };

        assert_eq!(engine.spin(&config, 500.0).unwrap(), SpinStart::Ignored);
        assert_eq!(
            engine.spin_forced(&config, 500.0, 1440.0).unwrap(),
            SpinStart::Ignored
        );
        assert_eq!(engine.spin_count(), 1);
        assert_eq!(
            engine.animation().map(|a| a.total_rotation_deg),
            Some(total_rotation_deg)
        );

        engine.tick(3000.0);
        let results = results.borrow();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].total_rotation_deg, total_rotation_deg);
    }

    #[test]
    fn test_forced_rotation_lands_predictably() {
        let (mut engine, results) = recording_engine();
        let config = WheelConfig::stock();

        engine.spin_forced(&config, 0.0, 1440.0).unwrap();
        engine.tick(3000.0);

        let results = results.borrow();
        assert_eq!(results[0].segment_index, 0);
        assert_eq!(results[0].segment.text, "Prize 1");
    }

    #[test]
    fn test_forced_rotation_validated() {
        let (mut engine, _) = recording_engine();
        let config = WheelConfig::stock();
        assert!(engine.spin_forced(&config, 0.0, f64::NAN).is_err());
        assert!(engine.spin_forced(&config, 0.0, -10.0).is_err());
        assert!(!engine.is_spinning());
    }

    #[test]
    fn test_rotation_resets_each_spin() {
        let (mut engine, _) = recording_engine();
        let config = WheelConfig::stock();

        engine.spin(&config, 0.0).unwrap();
        engine.tick(3000.0);
        assert!(engine.rotation() > 0.0);

        engine.spin(&config, 4000.0).unwrap();
        assert_eq!(engine.rotation(), 0.0);
    }

    #[test]
    fn test_can_spin_again_after_completion() {
        let (mut engine, results) = recording_engine();
        let config = WheelConfig::stock();

        engine.spin(&config, 0.0).unwrap();
        engine.tick(3000.0);
        assert!(!engine.is_spinning());

        assert!(engine.spin(&config, 3100.0).unwrap().is_started());
        engine.tick(6100.0);
        assert_eq!(results.borrow().len(), 2);
    }

    #[test]
    fn test_seeded_engines_agree() {
        let (mut a, ra) = recording_engine();
        let (mut b, rb) = recording_engine();
        let config = WheelConfig::stock();

        for n in 0..5 {
            let now = n as f64 * 5000.0;
            a.spin(&config, now).unwrap();
            b.spin(&config, now).unwrap();
            a.tick(now + 3000.0);
            b.tick(now + 3000.0);
        }
        assert_eq!(*ra.borrow(), *rb.borrow());
    }
}
