//! Colorset registry for coloring analysis data
//!
//! Loads colorsets from colorsets.json (embedded at compile time) and provides
//! access by name. Legend parameters refer to colorsets by name and map data
//! values onto them by linear interpolation.

use super::color::Color;
use super::error::{DisplayError, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Embedded colorsets.json content
const COLORSETS_JSON: &str = include_str!("../../colorsets.json");

/// Default colorset name for legends
pub const DEFAULT_COLORSET: &str = "original";

static COLORSET_REGISTRY: OnceLock<ColorsetRegistry> = OnceLock::new();

/// Global colorset registry, initialized lazily on first access
pub fn colorsets() -> &'static ColorsetRegistry {
    COLORSET_REGISTRY.get_or_init(|| {
        ColorsetRegistry::from_json(COLORSETS_JSON).unwrap_or_else(|e| {
            tracing::error!("Failed to load colorsets.json: {}", e);
            ColorsetRegistry::default()
        })
    })
}

#[derive(Debug, Deserialize)]
struct ColorsetEntry {
    name: String,
    colors: Vec<String>,
}

/// A named list of colors ordered from low to high values
#[derive(Debug, Clone, PartialEq)]
pub struct Colorset {
    pub name: String,
    pub colors: Vec<Color>,
}

impl Colorset {
    /// Get a color by index (wraps around)
    pub fn get_color(&self, index: usize) -> Color {
        if self.colors.is_empty() {
            return Color::GRAY;
        }
        self.colors[index % self.colors.len()]
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Interpolate a color from the colorset at position t ∈ [0, 1]
    ///
    /// t=0 returns the first color, t=1 returns the last color.
    pub fn interpolate(&self, t: f64) -> Color {
        if self.colors.is_empty() {
            return Color::GRAY;
        }

        let n = self.colors.len();
        if n == 1 {
            return self.colors[0];
        }

        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let pos = t * (n - 1) as f64;
        let idx_low = pos.floor() as usize;
        let idx_high = (idx_low + 1).min(n - 1);
        let frac = pos - idx_low as f64;

        self.colors[idx_low].lerp(&self.colors[idx_high], frac)
    }
}

/// Registry of all available colorsets
#[derive(Debug, Clone, Default)]
pub struct ColorsetRegistry {
    /// Colorsets by lowercase name
    colorsets: HashMap<String, Colorset>,
    /// Names in file order (for listing)
    names: Vec<String>,
}

impl ColorsetRegistry {
    /// Load colorsets from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let entries: Vec<ColorsetEntry> = serde_json::from_str(json)
            .map_err(|e| DisplayError::Config(format!("Failed to parse colorsets JSON: {}", e)))?;

        let mut registry = Self::default();
        for entry in entries {
            let colors = entry
                .colors
                .iter()
                .map(|hex| Color::from_hex(hex))
                .collect::<Result<Vec<_>>>()
                .map_err(|e| {
                    DisplayError::Config(format!("Colorset '{}': {}", entry.name, e))
                })?;

            registry.names.push(entry.name.clone());
            registry.colorsets.insert(
                entry.name.to_lowercase(),
                Colorset {
                    name: entry.name,
                    colors,
                },
            );
        }

        tracing::debug!("Loaded {} colorsets", registry.colorsets.len());
        Ok(registry)
    }

    /// Get a colorset by name (case-insensitive)
    pub fn get(&self, name: &str) -> Option<&Colorset> {
        self.colorsets.get(&name.to_lowercase())
    }

    pub fn default_colorset(&self) -> Option<&Colorset> {
        self.get(DEFAULT_COLORSET)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }
}
