//! Reel view: which symbols of each strip are inside the window, and where
//!
//! Each reel is drawn as its strip repeated [`STRIP_REPEATS`] times, scrolled
//! up by the reel's offset. Y positions are relative to the top of the
//! window; a symbol cell spans `y..y + SYMBOL_HEIGHT`.

use lg_core::{Face, ImageCache, ImageRef};

use crate::config::SlotConfig;
use crate::timing::SYMBOL_HEIGHT;

/// Height of the visible reel window
pub const VIEWPORT_HEIGHT: f64 = 300.0;

/// Copies of the strip laid end to end
pub const STRIP_REPEATS: usize = 3;

/// A symbol cell that overlaps the window
#[derive(Debug, Clone, PartialEq)]
pub struct VisibleSymbol<'a> {
    /// Index on the reel strip
    pub symbol_index: usize,
    pub y: f64,
    pub face: Face<'a>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReelView<'a> {
    pub reel_index: usize,
    pub offset: f64,
    pub symbols: Vec<VisibleSymbol<'a>>,
}

/// Everything needed to draw one frame of the slot machine
#[derive(Debug, Clone, PartialEq)]
pub struct SlotPaint<'a> {
    pub reels: Vec<ReelView<'a>>,
    pub background: Option<&'a ImageRef>,
}

impl SlotPaint<'_> {
    /// Symbol index sitting at the top of each window
    pub fn top_symbols(&self) -> Vec<Option<usize>> {
        self.reels
            .iter()
            .map(|reel| {
                reel.symbols
                    .iter()
                    .find(|s| s.y > -SYMBOL_HEIGHT / 2.0 && s.y <= SYMBOL_HEIGHT / 2.0)
                    .map(|s| s.symbol_index)
            })
            .collect()
    }
}

/// Symbol that a resting offset shows at the top of the window
pub fn resting_symbol_index(offset: f64, reel_len: usize) -> usize {
    if reel_len == 0 {
        return 0;
    }
    (offset / SYMBOL_HEIGHT).round().max(0.0) as usize % reel_len
}

/// Lay out every reel at the given offsets.
///
/// Reels without an offset (e.g. before the first spin) are drawn at rest.
pub fn paint_slot<'a>(
    config: &'a SlotConfig,
    offsets: &[f64],
    images: &'a ImageCache,
) -> SlotPaint<'a> {
    let reels = config
        .reels
        .iter()
        .enumerate()
        .map(|(reel_index, reel)| {
            let offset = offsets.get(reel_index).copied().unwrap_or(0.0);
            let len = reel.len();

            let symbols = (0..len * STRIP_REPEATS)
                .filter_map(move |cell| {
                    let y = cell as f64 * SYMBOL_HEIGHT - offset;
                    if y + SYMBOL_HEIGHT <= 0.0 || y >= VIEWPORT_HEIGHT {
                        return None;
                    }
                    let symbol_index = cell % len;
                    Some(VisibleSymbol {
                        symbol_index,
                        y,
                        face: images.face(&reel[symbol_index]),
                    })
                })
                .collect();

            ReelView {
                reel_index,
                offset,
                symbols,
            }
        })
        .collect();

    SlotPaint {
        reels,
        background: config.background_image.as_ref(),
    }
}
