//! Paint model for the wheel surface
//!
//! Turns a configuration, the current rotation and the resolved images into
//! plain geometry. Any canvas can draw it: each wedge is an arc from
//! `start_angle` to `end_angle` (radians, clockwise from the x axis) filled
//! with `color`, and carries either an image or a text label.

use lg_core::{Face, ImageCache, ImageRef};

use crate::config::{PointerStyle, WheelConfig};

/// Default surface edge length
pub const CANVAS_SIZE: f64 = 400.0;

/// Gap between the rim and the surface edge
pub const RIM_INSET: f64 = 10.0;

/// Text labels end this far inside the rim
pub const LABEL_INSET: f64 = 20.0;

/// Edge length of a segment image
pub const SEGMENT_IMAGE_SIZE: f64 = 40.0;

/// One wedge ready to draw
#[derive(Debug, Clone, PartialEq)]
pub struct Wedge<'a> {
    pub index: usize,
    pub start_angle: f64,
    pub end_angle: f64,
    pub color: &'a str,
    pub face: Face<'a>,
    /// Angle of the wedge's bisector; labels are drawn rotated to it
    pub label_angle: f64,
    /// Distance from the center where the face is anchored. Text is
    /// right-aligned at this radius, images are centered on it.
    pub label_radius: f64,
}

/// Everything needed to draw one frame of the wheel
#[derive(Debug, Clone, PartialEq)]
pub struct WheelPaint<'a> {
    pub center: (f64, f64),
    pub radius: f64,
    pub wedges: Vec<Wedge<'a>>,
    pub pointer: PointerStyle,
    pub background: Option<&'a ImageRef>,
}

/// Lay out the wheel for a `width × height` surface at `rotation` radians
pub fn paint_wheel<'a>(
    config: &'a WheelConfig,
    rotation: f64,
    images: &'a ImageCache,
    width: f64,
    height: f64,
) -> WheelPaint<'a> {
    let center = (width / 2.0, height / 2.0);
    let radius = (center.0.min(center.1) - RIM_INSET).max(0.0);
    let arc = std::f64::consts::TAU / config.segments.len().max(1) as f64;

    let wedges = config
        .segments
        .iter()
        .enumerate()
        .map(|(index, segment)| {
            let start_angle = index as f64 * arc + rotation;
            let face = images.face(segment);
            let label_radius = if face.is_image() {
                radius / 2.0
            } else {
                radius - LABEL_INSET
            };

            Wedge {
                index,
                start_angle,
                end_angle: start_angle + arc,
                color: &segment.color,
                face,
                label_angle: start_angle + arc / 2.0,
                label_radius,
            }
        })
        .collect();

    WheelPaint {
        center,
        radius,
        wedges,
        pointer: config.pointer_style,
        background: config.background_image.as_ref(),
    }
}
