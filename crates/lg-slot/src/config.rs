//! Slot machine configuration

use serde::{Deserialize, Serialize};

use lg_core::{Entity, ImageRef, LgError, LgResult, ensure_unique_ids};

/// Text given to freshly added symbols
pub const NEW_SYMBOL_TEXT: &str = "🎰";

/// A symbol on a reel strip
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotSymbol {
    /// Identity used for win matching
    pub id: String,
    /// Text or emoji drawn when no image is available
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<ImageRef>,
}

impl SlotSymbol {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            image_url: None,
        }
    }

    pub fn with_image(mut self, image: ImageRef) -> Self {
        self.image_url = Some(image);
        self
    }
}

impl Entity for SlotSymbol {
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

/// Partial update for a symbol; `None` leaves a field unchanged
#[derive(Debug, Clone, Default)]
pub struct SymbolUpdate {
    pub text: Option<String>,
    /// `Some(None)` removes the image
    pub image_url: Option<Option<ImageRef>>,
}

/// A reel strip, top to bottom
pub type Reel = Vec<SlotSymbol>;

/// Complete slot machine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotConfig {
    pub reels: Vec<Reel>,
    /// Declared reel count, must match `reels.len()`
    pub num_reels: usize,
    /// Base spin duration (ms)
    pub spin_duration: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_image: Option<ImageRef>,
}

impl SlotConfig {
    /// Three fruit reels the configurator starts from.
    ///
    /// Equal fruits share an id across reels so a line of them wins.
    pub fn stock() -> Self {
        let reel = || {
            vec![
                SlotSymbol::new("apple", "🍎"),
                SlotSymbol::new("lemon", "🍋"),
                SlotSymbol::new("grape", "🍇"),
            ]
        };
        Self {
            reels: vec![reel(), reel(), reel()],
            num_reels: 3,
            spin_duration: 3000,
            background_image: None,
        }
    }

    /// Reject configurations a spin cannot run on
    pub fn validate(&self) -> LgResult<()> {
        if self.reels.is_empty() {
            return Err(LgError::NoReels);
        }
        if self.num_reels != self.reels.len() {
            return Err(LgError::ReelCountMismatch {
                declared: self.num_reels,
                actual: self.reels.len(),
            });
        }
        if self.spin_duration == 0 {
            return Err(LgError::InvalidDuration(self.spin_duration));
        }
        for (reel, symbols) in self.reels.iter().enumerate() {
            if symbols.is_empty() {
                return Err(LgError::EmptyReel { reel });
            }
            ensure_unique_ids(symbols.iter().map(|s| s.id.as_str()))?;
        }
        Ok(())
    }

    pub fn reel_count(&self) -> usize {
        self.reels.len()
    }

    pub fn reel(&self, reel: usize) -> LgResult<&Reel> {
        self.reels.get(reel).ok_or(LgError::ReelOutOfRange {
            reel,
            count: self.reels.len(),
        })
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

    /// Append a 🎰 symbol with a fresh id to a reel
    pub fn with_symbol_added(&self, reel: usize) -> LgResult<Self> {
        self.reel(reel)?;
        let mut next = self.clone();
        next.reels[reel].push(SlotSymbol::new(
            uuid::Uuid::new_v4().simple().to_string(),
            NEW_SYMBOL_TEXT,
        ));
        Ok(next)
    }

    pub fn without_symbol(&self, reel: usize, id: &str) -> LgResult<Self> {
        if !self.reel(reel)?.iter().any(|s| s.id == id) {
            return Err(LgError::UnknownId(id.to_string()));
        }
        let mut next = self.clone();
        next.reels[reel].retain(|s| s.id != id);
        Ok(next)
    }

    pub fn with_symbol_updated(&self, reel: usize, id: &str, update: SymbolUpdate) -> LgResult<Self> {
        self.reel(reel)?;
        let mut next = self.clone();
        let symbol = next.reels[reel]
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| LgError::UnknownId(id.to_string()))?;

        if let Some(text) = update.text {
            symbol.text = text;
        }
        if let Some(image) = update.image_url {
            symbol.image_url = image;
        }
        Ok(next)
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

impl Default for SlotConfig {
    fn default() -> Self {
        Self::stock()
    }
}
