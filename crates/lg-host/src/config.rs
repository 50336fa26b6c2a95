//! Host configuration file: `{ wheel, slot }` in JSON or YAML

use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use lg_slot::SlotConfig;
use lg_wheel::WheelConfig;

/// Both widget configurations. A missing section falls back to the stock one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostConfig {
    #[serde(default)]
    pub wheel: WheelConfig,
    #[serde(default)]
    pub slot: SlotConfig,
}

impl HostConfig {
    /// Load from `path`, or the stock configurations when none is given
    pub fn load_or_stock(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => {
                log::debug!("No config file given, using stock configurations");
                Ok(Self::default())
            }
        }
    }

    /// Load by extension: `.json`, `.yaml` or `.yml`
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        let config: Self = match extension.as_deref() {
            Some("json") => serde_json::from_str(&text)
                .with_context(|| format!("Invalid JSON in {}", path.display()))?,
            Some("yaml") | Some("yml") => serde_yml::from_str(&text)
                .with_context(|| format!("Invalid YAML in {}", path.display()))?,
            _ => bail!(
                "Unsupported config format: {} (expected .json, .yaml or .yml)",
                path.display()
            ),
        };

        log::info!(
            "Loaded {}: {} wheel segments, {} slot reels",
            path.display(),
            config.wheel.segment_count(),
            config.slot.reel_count()
        );
        Ok(config)
    }
}
