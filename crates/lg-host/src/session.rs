//! Spin sessions: drive an engine frame by frame and print what a canvas
//! would draw

use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;
use std::time::Duration;

use anyhow::Result;

use lg_core::{Face, FrameClock, ImageCache, ManualClock, SystemClock, frame_interval_ms};
use lg_slot::{SlotConfig, SlotPaint, SlotResult, SlotSpinEngine, paint_slot};
use lg_wheel::{CANVAS_SIZE, SpinResult, WheelConfig, WheelPaint, WheelSpinEngine, paint_wheel};

/// Progress lines are printed at most this often (simulated ms)
const PROGRESS_INTERVAL_MS: f64 = 500.0;

/// How frames are timed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pacing {
    pub fps: u32,
    /// Sleep between frames and read the wall clock instead of simulating
    pub realtime: bool,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            fps: 60,
            realtime: false,
        }
    }
}

enum Frames {
    Simulated(ManualClock),
    Realtime(SystemClock),
}

impl Frames {
    fn new(pacing: Pacing) -> Self {
        if pacing.realtime {
            Frames::Realtime(SystemClock::new())
        } else {
            Frames::Simulated(ManualClock::new())
        }
    }

    fn now_ms(&self) -> f64 {
        match self {
            Frames::Simulated(clock) => clock.now_ms(),
            Frames::Realtime(clock) => clock.now_ms(),
        }
    }

    /// Wait for the next display frame and return its timestamp
    fn next(&mut self, pacing: Pacing) -> f64 {
        let interval = frame_interval_ms(pacing.fps);
        match self {
            Frames::Simulated(clock) => clock.advance(interval),
            Frames::Realtime(clock) => {
                std::thread::sleep(Duration::from_secs_f64(interval / 1000.0));
                clock.now_ms()
            }
        }
    }
}

fn face_label(face: &Face<'_>) -> String {
    match face {
        Face::Image(handle) => format!("[image {}x{}]", handle.width, handle.height),
        Face::Text(text) => text.to_string(),
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// WHEEL
// ═══════════════════════════════════════════════════════════════════════════════

fn print_wheel(paint: &WheelPaint<'_>, out: &mut impl Write) -> Result<()> {
    writeln!(
        out,
        "{} pointer, {} segments, radius {:.0}",
        paint.pointer.glyph(),
        paint.wedges.len(),
        paint.radius
    )?;
    if let Some(background) = paint.background {
        writeln!(out, "  background: {}", background.as_str())?;
    }
    for wedge in &paint.wedges {
        writeln!(
            out,
            "  {:>2} {} {:>6.1}°..{:>6.1}° {}",
            wedge.index,
            wedge.color,
            wedge.start_angle.to_degrees().rem_euclid(360.0),
            wedge.end_angle.to_degrees().rem_euclid(360.0),
            face_label(&wedge.face)
        )?;
    }
    Ok(())
}

/// Run `spins` wheel spins back to back, printing progress and results
pub fn run_wheel(
    config: &WheelConfig,
    images: &ImageCache,
    seed: Option<u64>,
    spins: u32,
    pacing: Pacing,
    out: &mut impl Write,
) -> Result<Vec<SpinResult>> {
    let results = Rc::new(RefCell::new(Vec::new()));
    let sink = results.clone();
    let mut engine = WheelSpinEngine::new(move |result| sink.borrow_mut().push(result));
    if let Some(seed) = seed {
        engine.seed(seed);
    }

    let mut frames = Frames::new(pacing);
    print_wheel(
        &paint_wheel(config, engine.rotation(), images, CANVAS_SIZE, CANVAS_SIZE),
        out,
    )?;

    for n in 1..=spins {
        let start = frames.now_ms();
        engine.spin(config, start)?;
        writeln!(out, "Spin {}/{}", n, spins)?;

        let mut next_progress = start;
        let mut frame_count = 0u32;
        while let Some(frame) = engine.tick(frames.next(pacing)) {
            frame_count += 1;
            if frames.now_ms() >= next_progress || frame.finished {
                writeln!(
                    out,
                    "  {:>5.1}% rotation {:>7.1}°",
                    frame.progress * 100.0,
                    frame.rotation_deg
                )?;
                next_progress += PROGRESS_INTERVAL_MS;
            }
        }
        log::debug!("Wheel spin {} drew {} frames", n, frame_count);

        print_wheel(
            &paint_wheel(config, engine.rotation(), images, CANVAS_SIZE, CANVAS_SIZE),
            out,
        )?;
        if let Some(result) = results.borrow().last() {
            writeln!(out, "{}", result)?;
        }
    }

    Ok(results.take())
}

// ═══════════════════════════════════════════════════════════════════════════════
// SLOT
// ═══════════════════════════════════════════════════════════════════════════════

fn print_slot(paint: &SlotPaint<'_>, out: &mut impl Write) -> Result<()> {
    if let Some(background) = paint.background {
        writeln!(out, "  background: {}", background.as_str())?;
    }
    let row: Vec<String> = paint
        .reels
        .iter()
        .map(|reel| {
            reel.symbols
                .first()
                .map(|s| face_label(&s.face))
                .unwrap_or_else(|| "?".to_string())
        })
        .collect();
    writeln!(out, "  | {} |", row.join(" | "))?;
    Ok(())
}

/// Run `spins` slot spins back to back, printing progress and results
pub fn run_slot(
    config: &SlotConfig,
    images: &ImageCache,
    seed: Option<u64>,
    spins: u32,
    pacing: Pacing,
    out: &mut impl Write,
) -> Result<Vec<SlotResult>> {
    let results = Rc::new(RefCell::new(Vec::new()));
    let sink = results.clone();
    let mut engine = SlotSpinEngine::new(move |result| sink.borrow_mut().push(result));
    if let Some(seed) = seed {
        engine.seed(seed);
    }

    let mut frames = Frames::new(pacing);
    writeln!(out, "{} reels", config.reel_count())?;
    print_slot(&paint_slot(config, engine.offsets(), images), out)?;

    for n in 1..=spins {
        let start = frames.now_ms();
        engine.spin(config, start)?;
        writeln!(out, "Spin {}/{}", n, spins)?;

        let mut next_progress = start;
        let mut frame_count = 0u32;
        while let Some(frame) = engine.tick(frames.next(pacing)) {
            frame_count += 1;
            let stopped = frame.stopped.iter().filter(|&&s| s).count();
            if frames.now_ms() >= next_progress {
                writeln!(
                    out,
                    "  {:>6.0}ms {}/{} reels stopped",
                    frames.now_ms() - start,
                    stopped,
                    frame.stopped.len()
                )?;
                next_progress += PROGRESS_INTERVAL_MS;
            }
            if frame.reported {
                if let Some(result) = results.borrow().last() {
                    writeln!(out, "{}", result)?;
                }
            }
        }
        log::debug!("Slot spin {} drew {} frames", n, frame_count);

        print_slot(&paint_slot(config, engine.offsets(), images), out)?;
    }

    Ok(results.take())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wheel_session_reports_every_spin() {
        let config = WheelConfig::stock();
        let images = ImageCache::new();
        let mut out = Vec::new();

        let results =
            run_wheel(&config, &images, Some(3), 3, Pacing::default(), &mut out).unwrap();
        assert_eq!(results.len(), 3);

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("⌄ pointer, 4 segments, radius 190"));
        assert!(text.contains("Spin 3/3"));
        for result in &results {
            assert!(text.contains(&format!("Result: {}", result.segment.text)));
        }
    }

    #[test]
    fn test_wheel_session_is_reproducible() {
        let config = WheelConfig::stock();
        let images = ImageCache::new();
        let run = || {
            let mut out = Vec::new();
            run_wheel(&config, &images, Some(8), 2, Pacing::default(), &mut out).unwrap()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_slot_session_shows_resting_row() {
        let config = SlotConfig::stock();
        let images = ImageCache::new();
        let mut out = Vec::new();

        let results = run_slot(&config, &images, Some(5), 2, Pacing::default(), &mut out).unwrap();
        assert_eq!(results.len(), 2);

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("3 reels\n  | 🍎 | 🍎 | 🍎 |"));
        let last = results.last().unwrap();
        let row = format!(
            "  | {} |",
            last.combination
                .iter()
                .map(|s| s.text.as_str())
                .collect::<Vec<_>>()
                .join(" | ")
        );
        assert!(text.trim_end().ends_with(&row));
        assert!(text.contains(last.headline()));
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let config = SlotConfig {
            reels: vec![],
            num_reels: 0,
            ..SlotConfig::stock()
        };
        let images = ImageCache::new();
        let mut out = Vec::new();
        assert!(run_slot(&config, &images, None, 1, Pacing::default(), &mut out).is_err());
    }
}
