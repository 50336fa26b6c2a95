//! # lg-slot: Slot machine spin engine
//!
//! Draws one stop per reel when a spin starts, scrolls every reel through
//! several full passes with staggered starts, and reports the combination
//! after a fixed wait.
//!
//! ## Architecture
//!
//! ```text
//! SlotSpinEngine
//!     │
//!     ├── SlotConfig (reels, duration)
//!     ├── draw_stops → [stop per reel] → SlotResult (combination, win)
//!     └── SlotAnimation
//!           ├── ReelTiming (delay, duration, completion wait)
//!           └── ReelAnimation::offset_at(now) × reels → SlotFrame
//!                 │
//!                 v
//!           paint_slot → SlotPaint
//! ```

pub mod config;
pub mod engine;
pub mod spin;
pub mod timing;
pub mod view;

pub use config::*;
pub use engine::*;
pub use spin::*;
pub use timing::*;
pub use view::*;
