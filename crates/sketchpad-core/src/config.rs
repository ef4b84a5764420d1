//! Sketchpad configuration.

use crate::drawable::SerializableColor;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Tunables for a sketchpad session, its renderer and export.
///
/// Every field has a default, so a config file only needs to list what it
/// overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SketchpadConfig {
    /// On-screen canvas width in pixels.
    pub canvas_width: u32,
    /// On-screen canvas height in pixels.
    pub canvas_height: u32,
    /// Integer multiplier applied to the canvas for raster export.
    pub export_scale: u32,
    pub background: SerializableColor,
    /// Thin marker width.
    pub thin_thickness: f64,
    /// Thick marker width.
    pub thick_thickness: f64,
    /// Pen colors, cycled in order. The first one is the initial pen color.
    pub pen_colors: Vec<SerializableColor>,
    /// Opacity of the tool preview relative to committed content.
    pub preview_opacity: f64,
    /// Glyph size in pixels (before export scaling).
    pub glyph_size: f64,
    /// Glyphs offered by the palette before any custom ones are registered.
    pub glyphs: Vec<String>,
    /// Font used to rasterize glyphs on export.
    pub glyph_font: Option<PathBuf>,
}

impl Default for SketchpadConfig {
    fn default() -> Self {
        Self {
            canvas_width: 256,
            canvas_height: 256,
            export_scale: 4,
            background: SerializableColor::white(),
            thin_thickness: 2.0,
            thick_thickness: 5.0,
            pen_colors: vec![
                SerializableColor::black(),
                SerializableColor::new(220, 38, 38, 255),
                SerializableColor::new(37, 99, 235, 255),
                SerializableColor::new(22, 163, 74, 255),
            ],
            preview_opacity: 0.3,
            glyph_size: 24.0,
            glyphs: vec!["😀".to_string(), "⭐".to_string(), "🎉".to_string()],
            glyph_font: None,
        }
    }
}

impl SketchpadConfig {
    /// Parse a JSON config, then validate it.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::debug!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Initial pen color.
    pub fn default_color(&self) -> SerializableColor {
        self.pen_colors
            .first()
            .copied()
            .unwrap_or_else(SerializableColor::black)
    }

    /// Size of the export surface in pixels, or `None` if it overflows `u32`.
    pub fn export_size(&self) -> Option<(u32, u32)> {
        Some((
            self.canvas_width.checked_mul(self.export_scale)?,
            self.canvas_height.checked_mul(self.export_scale)?,
        ))
    }

    fn validate(&self) -> ConfigResult<()> {
        if self.canvas_width == 0 || self.canvas_height == 0 {
            return Err(ConfigError::Invalid {
                field: "canvas_width/canvas_height",
                reason: "canvas must be at least 1x1".to_string(),
            });
        }
        if self.export_scale == 0 {
            return Err(ConfigError::Invalid {
                field: "export_scale",
                reason: "must be a positive integer".to_string(),
            });
        }
        if self.export_size().is_none() {
            return Err(ConfigError::Invalid {
                field: "export_scale",
                reason: format!(
                    "{}x{} canvas at {}x overflows the export size",
                    self.canvas_width, self.canvas_height, self.export_scale
                ),
            });
        }
        if !(0.0..=1.0).contains(&self.preview_opacity) {
            return Err(ConfigError::Invalid {
                field: "preview_opacity",
                reason: format!("{} is outside 0..=1", self.preview_opacity),
            });
        }
        for (field, value) in [
            ("thin_thickness", self.thin_thickness),
            ("thick_thickness", self.thick_thickness),
            ("glyph_size", self.glyph_size),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("{value} is not a positive size"),
                });
            }
        }
        Ok(())
    }
}
