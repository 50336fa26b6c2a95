//! Wheel configuration

use rand::Rng;
use serde::{Deserialize, Serialize};

use lg_core::{Entity, ImageRef, LgError, LgResult, ensure_unique_ids};

/// Pointer drawn above the wheel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerStyle {
    Classic,
    Arrow,
    Triangle,
}

impl PointerStyle {
    /// Glyph for text surfaces
    pub fn glyph(&self) -> &'static str {
        match self {
            PointerStyle::Classic => "▼",
            PointerStyle::Arrow => "⌄",
            PointerStyle::Triangle => "▽",
        }
    }
}

impl Default for PointerStyle {
    fn default() -> Self {
        Self::Arrow
    }
}

/// One wedge of the wheel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    /// Unique within the wheel
    pub id: String,
    /// Label drawn when no image is available
    pub text: String,
    /// Fill color (`#rrggbb`)
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<ImageRef>,
}

impl Segment {
    pub fn new(id: impl Into<String>, text: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            color: color.into(),
            image_url: None,
        }
    }

    pub fn with_image(mut self, image: ImageRef) -> Self {
        self.image_url = Some(image);
        self
    }
}

impl Entity for Segment {
    fn id(&self) -> &str {
        &self.id
    }

    fn text(&self) -> &str {
        &self.text
    }

    fn image(&self) -> Option<&ImageRef> {
        self.image_url.as_ref()
    }
}

/// Partial update for a segment; `None` leaves a field unchanged
#[derive(Debug, Clone, Default)]
pub struct SegmentUpdate {
    pub text: Option<String>,
    pub color: Option<String>,
    /// `Some(None)` removes the image
    pub image_url: Option<Option<ImageRef>>,
}

/// Complete wheel configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WheelConfig {
    pub segments: Vec<Segment>,
    #[serde(default)]
    pub pointer_style: PointerStyle,
    /// Spin duration (ms)
    pub spin_duration: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_image: Option<ImageRef>,
}

impl WheelConfig {
    /// Four-prize wheel the configurator starts from
    pub fn stock() -> Self {
        Self {
            segments: vec![
                Segment::new("1", "Prize 1", "#FF6B6B"),
                Segment::new("2", "Prize 2", "#4ECDC4"),
                Segment::new("3", "Prize 3", "#45B7D1"),
                Segment::new("4", "Prize 4", "#96CEB4"),
            ],
            pointer_style: PointerStyle::Arrow,
            spin_duration: 3000,
            background_image: None,
        }
    }

    /// Reject configurations a spin cannot run on
    pub fn validate(&self) -> LgResult<()> {
        if self.segments.is_empty() {
            return Err(LgError::EmptySegments);
        }
        if self.spin_duration == 0 {
            return Err(LgError::InvalidDuration(self.spin_duration));
        }
        ensure_unique_ids(self.segments.iter().map(|s| s.id.as_str()))
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Angular width of one segment (degrees)
    pub fn segment_arc_deg(&self) -> f64 {
        lg_core::FULL_TURN_DEG / self.segments.len().max(1) as f64
    }

    pub fn to_json(&self) -> LgResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| LgError::Serialization(e.to_string()))
    }

    /// Parse and validate
    pub fn from_json(json: &str) -> LgResult<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| LgError::Serialization(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // EDITING (every edit returns a new configuration)
    // ═══════════════════════════════════════════════════════════════════════════

    /// Append `Option N` with a fresh id and a random color
    pub fn with_segment_added<R: Rng + ?Sized>(&self, rng: &mut R) -> Self {
        let mut next = self.clone();
        let number = next.segments.len() + 1;
        next.segments.push(Segment::new(
            uuid::Uuid::new_v4().simple().to_string(),
            format!("Option {}", number),
            random_color(rng),
        ));
        next
    }

    pub fn without_segment(&self, id: &str) -> LgResult<Self> {
        if !self.segments.iter().any(|s| s.id == id) {
            return Err(LgError::UnknownId(id.to_string()));
        }
        let mut next = self.clone();
        next.segments.retain(|s| s.id != id);
        Ok(next)
    }

    pub fn with_segment_updated(&self, id: &str, update: SegmentUpdate) -> LgResult<Self> {
        let mut next = self.clone();
        let segment = next
            .segments
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| LgError::UnknownId(id.to_string()))?;

        if let Some(text) = update.text {
            segment.text = text;
        }
        if let Some(color) = update.color {
            segment.color = color;
        }
        if let Some(image) = update.image_url {
            segment.image_url = image;
        }
        Ok(next)
    }

    pub fn with_pointer_style(&self, pointer_style: PointerStyle) -> Self {
        Self {
            pointer_style,
            ..self.clone()
        }
    }

    pub fn with_spin_duration(&self, spin_duration: u32) -> Self {
        Self {
            spin_duration,
            ..self.clone()
        }
    }

    pub fn with_background(&self, background_image: Option<ImageRef>) -> Self {
        Self {
            background_image,
            ..self.clone()
        }
    }
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self::stock()
    }
}

/// Random `#rrggbb` color
pub fn random_color<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("#{:06x}", rng.random_range(0..=0xFF_FFFFu32))
}
