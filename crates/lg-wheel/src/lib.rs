//! # lg-wheel: Prize wheel spin engine
//!
//! Picks an outcome by drawing the total rotation up front, eases the wheel
//! toward it frame by frame, then maps the resting angle back to the segment
//! under the pointer.
//!
//! ## Architecture
//!
//! ```text
//! WheelSpinEngine
//!     │
//!     ├── WheelConfig (segments, pointer, duration)
//!     ├── draw_total_rotation → [1440°, 1800°)
//!     └── WheelAnimation::step(now) → WheelFrame
//!           │
//!           v
//!     landing_segment → SpinResult → on_complete
//! ```

pub mod config;
pub mod engine;
pub mod paint;
pub mod spin;

pub use config::*;
pub use engine::*;
pub use paint::*;
pub use spin::*;
