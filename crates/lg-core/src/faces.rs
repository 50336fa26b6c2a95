//! Image resolution for segment and symbol faces
//!
//! An entity may carry an image reference (a `data:` URL from an upload, or a
//! filesystem path). References are resolved to decoded RGBA handles before
//! the first paint. A reference that fails to resolve is logged and the
//! entity is painted with its text instead; the spin is never affected.

use std::collections::HashMap;
use std::sync::Arc;

use base64::Engine as _;
use base64::engine::general_purpose;
use serde::{Deserialize, Serialize};

use crate::error::{LgError, LgResult};

/// Reference to an image: `data:<mime>;base64,<payload>` or a file path
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageRef(pub String);

impl ImageRef {
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Is this an inline `data:` URL?
    pub fn is_data_url(&self) -> bool {
        self.0.starts_with("data:")
    }
}

/// Decoded RGBA8 image ready to draw
#[derive(Debug, Clone, PartialEq)]
pub struct ImageHandle {
    pub width: u32,
    pub height: u32,
    pixels: Arc<Vec<u8>>,
}

impl ImageHandle {
    /// Wrap already decoded RGBA8 pixels
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        Self {
            width,
            height,
            pixels: Arc::new(pixels),
        }
    }

    /// Raw RGBA8 pixels, row-major
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}

/// Anything the widgets paint: a wheel segment or a reel symbol
pub trait Entity {
    fn id(&self) -> &str;
    fn text(&self) -> &str;
    fn image(&self) -> Option<&ImageRef>;
}

/// What to draw for one entity
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Face<'a> {
    Image(&'a ImageHandle),
    Text(&'a str),
}

impl Face<'_> {
    pub fn is_image(&self) -> bool {
        matches!(self, Face::Image(_))
    }
}

/// Resolve a reference to a decoded image
pub async fn resolve_image(reference: &ImageRef) -> LgResult<ImageHandle> {
    let bytes = if reference.is_data_url() {
        decode_data_url(reference.as_str())?
    } else {
        tokio::fs::read(reference.as_str()).await?
    };

    tokio::task::spawn_blocking(move || decode_image(&bytes))
        .await
        .map_err(|e| LgError::Image(format!("decode task failed: {}", e)))?
}

fn decode_data_url(url: &str) -> LgResult<Vec<u8>> {
    let rest = url
        .strip_prefix("data:")
        .ok_or_else(|| LgError::Image("not a data URL".into()))?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| LgError::Image("data URL has no payload".into()))?;

    if !header.ends_with(";base64") {
        return Err(LgError::Image(format!(
            "unsupported data URL encoding: {}",
            header
        )));
    }

    general_purpose::STANDARD
        .decode(payload.trim())
        .map_err(|e| LgError::Image(format!("invalid base64: {}", e)))
}

fn decode_image(bytes: &[u8]) -> LgResult<ImageHandle> {
    let rgba = image::load_from_memory(bytes)
        .map_err(|e| LgError::Image(e.to_string()))?
        .to_rgba8();

    Ok(ImageHandle::new(rgba.width(), rgba.height(), rgba.into_raw()))
}

/// Resolved images keyed by reference.
///
/// Entities that share an id (equal fruits on different reels) still get
/// their own image, and changing an entity's reference picks up the new one.
#[derive(Debug, Clone, Default)]
pub struct ImageCache {
    images: HashMap<ImageRef, ImageHandle>,
}

impl ImageCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cache for a set of entities
    pub async fn preload<E: Entity>(entities: &[E]) -> Self {
        let mut cache = Self::new();
        cache.load_missing(entities).await;
        cache
    }

    /// Resolve references that are not cached yet. Returns how many were
    /// newly resolved.
    pub async fn load_missing<E: Entity>(&mut self, entities: &[E]) -> usize {
        let mut loaded = 0;

        for entity in entities {
            let Some(reference) = entity.image() else {
                continue;
            };
            if self.images.contains_key(reference) {
                continue;
            }

            match resolve_image(reference).await {
                Ok(handle) => {
                    log::debug!(
                        "Resolved image for '{}' ({}x{})",
                        entity.id(),
                        handle.width,
                        handle.height
                    );
                    self.images.insert(reference.clone(), handle);
                    loaded += 1;
                }
                Err(e) => {
                    log::warn!(
                        "Image for '{}' unavailable, drawing text instead: {}",
                        entity.id(),
                        e
                    );
                }
            }
        }

        loaded
    }

    pub fn insert(&mut self, reference: ImageRef, handle: ImageHandle) {
        self.images.insert(reference, handle);
    }

    pub fn get(&self, reference: &ImageRef) -> Option<&ImageHandle> {
        self.images.get(reference)
    }

    /// Face to paint for an entity: its image when it has a reference and
    /// the image resolved, otherwise its text.
    pub fn face<'a, E: Entity>(&'a self, entity: &'a E) -> Face<'a> {
        match entity.image().and_then(|reference| self.images.get(reference)) {
            Some(handle) => Face::Image(handle),
            None => Face::Text(entity.text()),
        }
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}
