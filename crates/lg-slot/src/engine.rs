//! Slot spin engine: staggered reels and result reporting

use rand::SeedableRng;
use rand::rngs::StdRng;

use lg_core::{LgResult, ease_out_cubic, progress};

use crate::config::SlotConfig;
use crate::spin::{SlotResult, check_stops, draw_stops};
use crate::timing::{FULL_PASSES, ReelTiming, SYMBOL_HEIGHT};

/// Completion callback, invoked once per finished spin
pub type SlotCallback = Box<dyn FnMut(SlotResult)>;

/// Scroll animation of a single reel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReelAnimation {
    pub reel_index: usize,
    /// When this reel starts moving (after its stagger delay)
    pub start_ms: f64,
    pub duration_ms: f64,
    /// Offset the reel had when the spin began
    pub start_offset: f64,
    /// Total scroll distance: full passes plus the way to the stop
    pub distance: f64,
    /// Height of one pass over the strip
    pub strip_height: f64,
}

impl ReelAnimation {
    /// Animation that scrolls `FULL_PASSES` strips and settles with `stop`
    /// at the top of the window.
    pub fn new(
        reel_index: usize,
        spin_start_ms: f64,
        timing: &ReelTiming,
        start_offset: f64,
        stop: usize,
        reel_len: usize,
    ) -> Self {
        let strip_height = reel_len.max(1) as f64 * SYMBOL_HEIGHT;
        let start_offset = start_offset.rem_euclid(strip_height);
        let final_offset = stop as f64 * SYMBOL_HEIGHT;
        let distance = FULL_PASSES as f64 * strip_height
            + (final_offset - start_offset).rem_euclid(strip_height);

        Self {
            reel_index,
            start_ms: spin_start_ms + timing.reel_delay(reel_index),
            duration_ms: timing.reel_duration(reel_index),
            start_offset,
            distance,
            strip_height,
        }
    }

    /// Displayed offset at `now_ms`, wrapped to one strip
    pub fn offset_at(&self, now_ms: f64) -> f64 {
        if now_ms < self.start_ms {
            return self.start_offset;
        }
        let t = progress(now_ms - self.start_ms, self.duration_ms);
        (self.start_offset + self.distance * ease_out_cubic(t)).rem_euclid(self.strip_height)
    }

    pub fn end_ms(&self) -> f64 {
        self.start_ms + self.duration_ms
    }

    pub fn is_finished(&self, now_ms: f64) -> bool {
        now_ms >= self.end_ms()
    }

    /// Offset the reel settles at
    pub fn resting_offset(&self) -> f64 {
        (self.start_offset + self.distance).rem_euclid(self.strip_height)
    }
}

/// All reel animations of one spin
#[derive(Debug, Clone, PartialEq)]
pub struct SlotAnimation {
    pub reels: Vec<ReelAnimation>,
}

/// Visual state of the reels at one instant
#[derive(Debug, Clone, PartialEq)]
pub struct SlotFrame {
    /// Offset per reel, wrapped to the reel's strip
    pub offsets: Vec<f64>,
    /// Which reels have come to rest
    pub stopped: Vec<bool>,
    /// The result was reported during this frame
    pub reported: bool,
}

impl SlotFrame {
    pub fn all_stopped(&self) -> bool {
        self.stopped.iter().all(|&s| s)
    }
}

impl SlotAnimation {
    /// Reel offsets and stop flags at `now_ms`
    pub fn step(&self, now_ms: f64) -> SlotFrame {
        SlotFrame {
            offsets: self.reels.iter().map(|r| r.offset_at(now_ms)).collect(),
            stopped: self.reels.iter().map(|r| r.is_finished(now_ms)).collect(),
            reported: false,
        }
    }

    pub fn is_finished(&self, now_ms: f64) -> bool {
        self.reels.iter().all(|r| r.is_finished(now_ms))
    }
}

/// What a spin request did
#[derive(Debug, Clone, PartialEq)]
pub enum SpinStart {
    /// A new spin is running toward these stops
    Started { stops: Vec<usize> },
    /// A spin was already in flight; nothing changed
    Ignored,
}

impl SpinStart {
    pub fn is_started(&self) -> bool {
        matches!(self, SpinStart::Started { .. })
    }
}

#[derive(Debug, Clone)]
struct PendingResult {
    result: SlotResult,
    due_ms: f64,
}

/// Slot machine spin engine
///
/// The result is reported once a fixed wait of
/// `spin_duration + reel_count × 200ms` has passed since the spin started.
/// That wait does not track the individual reels: later reels may still be
/// settling, and keep animating on subsequent ticks after the report.
pub struct SlotSpinEngine {
    rng: StdRng,
    on_complete: SlotCallback,
    /// Current offset per reel
    offsets: Vec<f64>,
    animation: Option<SlotAnimation>,
    pending: Option<PendingResult>,
    spin_count: u64,
}

impl SlotSpinEngine {
    pub fn new(on_complete: impl FnMut(SlotResult) + 'static) -> Self {
        Self {
            rng: StdRng::from_os_rng(),
            on_complete: Box::new(on_complete),
            offsets: Vec::new(),
            animation: None,
            pending: None,
            spin_count: 0,
        }
    }

    /// Engine with a reproducible outcome sequence
    pub fn with_seed(seed: u64, on_complete: impl FnMut(SlotResult) + 'static) -> Self {
        let mut engine = Self::new(on_complete);
        engine.seed(seed);
        engine
    }

    /// Seed RNG for reproducible results
    pub fn seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    /// Start a spin with random stops
    pub fn spin(&mut self, config: &SlotConfig, now_ms: f64) -> LgResult<SpinStart> {
        if self.is_spinning() {
            log::debug!("Slot spin requested while spinning, ignored");
            return Ok(SpinStart::Ignored);
        }
        config.validate()?;

        let stops = draw_stops(&mut self.rng, config);
        Ok(self.start(config, now_ms, stops))
    }

    /// Start a spin toward chosen stops, one per reel
    pub fn spin_forced(
        &mut self,
        config: &SlotConfig,
        now_ms: f64,
        stops: &[usize],
    ) -> LgResult<SpinStart> {
        if self.is_spinning() {
            log::debug!("Forced slot spin requested while spinning, ignored");
            return Ok(SpinStart::Ignored);
        }
        config.validate()?;
        check_stops(config, stops)?;

        log::debug!("Forcing slot stops {:?}", stops);
        Ok(self.start(config, now_ms, stops.to_vec()))
    }

    fn start(&mut self, config: &SlotConfig, now_ms: f64, stops: Vec<usize>) -> SpinStart {
        self.spin_count += 1;
        self.offsets.resize(config.reel_count(), 0.0);

        let timing = ReelTiming::new(config.spin_duration as f64);
        let reels = config
            .reels
            .iter()
            .zip(&stops)
            .enumerate()
            .map(|(index, (reel, &stop))| {
                ReelAnimation::new(index, now_ms, &timing, self.offsets[index], stop, reel.len())
            })
            .collect();

        let result = SlotResult::from_stops(config, &stops);
        let due_ms = now_ms + timing.completion_wait(config.reel_count());

        log::debug!(
            "Slot spin #{} started: {} reels, stops {:?}, result due in {}ms",
            self.spin_count,
            config.reel_count(),
            stops,
            due_ms - now_ms
        );

        self.animation = Some(SlotAnimation { reels });
        self.pending = Some(PendingResult { result, due_ms });

        SpinStart::Started { stops }
    }

    /// Advance to `now_ms`. Returns the frame to draw, or `None` when the
    /// reels are at rest and nothing is pending.
    pub fn tick(&mut self, now_ms: f64) -> Option<SlotFrame> {
        if self.animation.is_none() && self.pending.is_none() {
            return None;
        }

        let mut frame = match &self.animation {
            Some(animation) => {
                let frame = animation.step(now_ms);
                self.offsets.clone_from(&frame.offsets);
                if animation.is_finished(now_ms) {
                    self.animation = None;
                }
                frame
            }
            None => SlotFrame {
                offsets: self.offsets.clone(),
                stopped: vec![true; self.offsets.len()],
                reported: false,
            },
        };
        log::trace!("Slot frame: offsets {:?}", frame.offsets);

        if self.pending.as_ref().is_some_and(|p| now_ms >= p.due_ms) {
            if let Some(pending) = self.pending.take() {
                log::info!(
                    "Slot spin #{} complete: {} ({})",
                    self.spin_count,
                    pending.result.combination_text(),
                    if pending.result.is_win { "win" } else { "no win" }
                );
                (self.on_complete)(pending.result);
                frame.reported = true;
            }
        }

        Some(frame)
    }

    /// Is a spin waiting to report its result?
    pub fn is_spinning(&self) -> bool {
        self.pending.is_some()
    }

    /// Are any reels still moving?
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Current offset per reel for the paint step
    pub fn offsets(&self) -> &[f64] {
        &self.offsets
    }

    /// Reel animations of the most recent spin, while any reel moves
    pub fn animation(&self) -> Option<&SlotAnimation> {
        self.animation.as_ref()
    }

    pub fn spin_count(&self) -> u64 {
        self.spin_count
    }
}
