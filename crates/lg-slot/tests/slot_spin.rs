//! End-to-end slot spins driven by a simulated display refresh

use std::cell::RefCell;
use std::rc::Rc;

use lg_core::{FrameClock, ImageCache, ManualClock, frame_interval_ms};
use lg_slot::{
    ReelTiming, SlotConfig, SlotResult, SlotSpinEngine, SlotSymbol, SpinStart, paint_slot,
    resting_symbol_index,
};

// ═══════════════════════════════════════════════════════════════════════════════
// FIXTURES
// ═══════════════════════════════════════════════════════════════════════════════

fn fruit_reels() -> SlotConfig {
    let reel = || {
        vec![
            SlotSymbol::new("apple", "🍎"),
            SlotSymbol::new("lemon", "🍋"),
            SlotSymbol::new("grape", "🍇"),
        ]
    };
    SlotConfig {
        reels: vec![reel(), reel(), reel()],
        num_reels: 3,
        spin_duration: 3000,
        background_image: None,
    }
}

fn recording_engine(seed: u64) -> (SlotSpinEngine, Rc<RefCell<Vec<SlotResult>>>) {
    let results = Rc::new(RefCell::new(Vec::new()));
    let sink = results.clone();
    let engine = SlotSpinEngine::with_seed(seed, move |r| sink.borrow_mut().push(r));
    (engine, results)
}

/// Tick at 60 Hz until the reels rest and the result is out
fn run_to_rest(engine: &mut SlotSpinEngine, clock: &mut ManualClock) -> usize {
    let mut frames = 0;
    while engine.tick(clock.advance(frame_interval_ms(60))).is_some() {
        frames += 1;
    }
    frames
}

// ═══════════════════════════════════════════════════════════════════════════════
// END-TO-END
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn three_apples_win() {
    let config = fruit_reels();
    let (mut engine, results) = recording_engine(1);
    let mut clock = ManualClock::new();

    engine.spin_forced(&config, clock.now_ms(), &[0, 0, 0]).unwrap();
    run_to_rest(&mut engine, &mut clock);

    let results = results.borrow();
    assert_eq!(results.len(), 1);
    let result = &results[0];
    assert!(result.is_win);
    let texts: Vec<&str> = result.combination.iter().map(|s| s.text.as_str()).collect();
    assert_eq!(texts, vec!["🍎", "🍎", "🍎"]);
    assert_eq!(result.to_string(), "🎉 Winner! 🎉\n🍎 🍎 🍎");
}

#[test]
fn mixed_line_loses() {
    let config = fruit_reels();
    let (mut engine, results) = recording_engine(1);
    let mut clock = ManualClock::new();

    engine.spin_forced(&config, 0.0, &[0, 0, 2]).unwrap();
    run_to_rest(&mut engine, &mut clock);

    let results = results.borrow();
    let result = &results[0];
    assert!(!result.is_win);
    assert_eq!(result.to_string(), "Try Again!\n🍎 🍎 🍇");
}

#[test]
fn result_fires_once_at_the_fixed_wait() {
    let config = fruit_reels();
    let timing = ReelTiming::new(config.spin_duration as f64);
    let wait = timing.completion_wait(config.reel_count());
    let (mut engine, results) = recording_engine(3);
    let mut clock = ManualClock::new();

    engine.spin(&config, 0.0).unwrap();

    let mut reported_at = None;
    let mut still_moving_at_report = false;
    while let Some(frame) = engine.tick(clock.advance(frame_interval_ms(60))) {
        if frame.reported {
            assert!(reported_at.is_none(), "result reported twice");
            reported_at = Some(clock.now_ms());
            still_moving_at_report = !frame.all_stopped();
        }
    }

    let reported_at = reported_at.unwrap();
    assert!(reported_at >= wait);
    assert!(reported_at < wait + frame_interval_ms(60));
    // The wait is shorter than the slowest reel for three reels
    assert!(still_moving_at_report);
    assert_eq!(results.borrow().len(), 1);
}

#[test]
fn combination_comes_from_each_reel() {
    let mut config = fruit_reels();
    config.reels[1] = vec![SlotSymbol::new("7", "7️⃣"), SlotSymbol::new("bar", "BAR")];
    let (mut engine, results) = recording_engine(99);

    for n in 0..40 {
        let now = n as f64 * 5000.0;
        engine.spin(&config, now).unwrap();
        engine.tick(now + 4000.0);
    }

    let results = results.borrow();
    assert_eq!(results.len(), 40);
    for result in results.iter() {
        assert_eq!(result.combination.len(), config.reel_count());
        for (reel, symbol) in result.combination.iter().enumerate() {
            assert!(config.reels[reel].contains(symbol));
        }
        assert!(!result.is_win);
    }
}

#[test]
fn spin_while_spinning_is_ignored() {
    let config = fruit_reels();
    let (mut engine, results) = recording_engine(4);
    let mut clock = ManualClock::new();

    let SpinStart::Started { stops } = engine.spin(&config, 0.0).unwrap() else {
        panic!("spin should start");
    };

    for _ in 0..100 {
        engine.tick(clock.advance(16.0));
        if engine.is_spinning() {
            assert_eq!(
                engine.spin(&config, clock.now_ms()).unwrap(),
                SpinStart::Ignored
            );
        }
    }
    run_to_rest(&mut engine, &mut clock);

    let results = results.borrow();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].stops, stops);
}

#[test]
fn resting_reels_show_the_drawn_stops() {
    let config = fruit_reels();
    let (mut engine, results) = recording_engine(12);
    let mut clock = ManualClock::new();
    let images = ImageCache::new();

    for _ in 0..10 {
        engine.spin(&config, clock.now_ms()).unwrap();
        run_to_rest(&mut engine, &mut clock);

        let result = results.borrow().last().cloned().unwrap();
        let shown: Vec<usize> = engine
            .offsets()
            .iter()
            .zip(&config.reels)
            .map(|(&offset, reel)| resting_symbol_index(offset, reel.len()))
            .collect();
        assert_eq!(shown, result.stops);

        let paint = paint_slot(&config, engine.offsets(), &images);
        let top: Vec<Option<usize>> = result.stops.iter().map(|&s| Some(s)).collect();
        assert_eq!(paint.top_symbols(), top);
    }
}

#[test]
fn empty_reel_rejected_before_spinning() {
    let mut config = fruit_reels();
    config.reels[2].clear();
    let (mut engine, results) = recording_engine(0);

    assert!(engine.spin(&config, 0.0).is_err());
    assert!(!engine.is_spinning());
    assert!(engine.tick(5000.0).is_none());
    assert!(results.borrow().is_empty());
}
