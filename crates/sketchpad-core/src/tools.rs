//! Current tool configuration and pointer position.

use crate::config::SketchpadConfig;
use crate::drawable::SerializableColor;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// What a pointer press does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ToolMode {
    /// Press and drag draws a stroke.
    #[default]
    Draw,
    /// A press stamps the pending symbol.
    Stamp,
}

/// Tool configuration shared by both modes.
///
/// `mode == Stamp` exactly when `pending_symbol` is set. Thickness, color and
/// rotation survive mode switches.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolState {
    mode: ToolMode,
    pub thickness: f64,
    pub color: SerializableColor,
    pub rotation_degrees: f64,
    pending_symbol: Option<String>,
    /// Last known pointer position.
    pointer: Point,
    pen_colors: Vec<SerializableColor>,
    color_index: usize,
}

impl Default for ToolState {
    fn default() -> Self {
        Self::new(&SketchpadConfig::default())
    }
}

impl ToolState {
    /// Thin black marker, as configured.
    pub fn new(config: &SketchpadConfig) -> Self {
        Self {
            mode: ToolMode::Draw,
            thickness: config.thin_thickness,
            color: config.default_color(),
            rotation_degrees: 0.0,
            pending_symbol: None,
            pointer: Point::ZERO,
            pen_colors: config.pen_colors.clone(),
            color_index: 0,
        }
    }

    pub fn mode(&self) -> ToolMode {
        self.mode
    }

    pub fn pending_symbol(&self) -> Option<&str> {
        self.pending_symbol.as_deref()
    }

    pub fn pointer(&self) -> Point {
        self.pointer
    }

    /// Switch to a pen; any pending glyph is dropped.
    pub fn select_pen(&mut self, thickness: f64, color: SerializableColor) {
        self.mode = ToolMode::Draw;
        self.pending_symbol = None;
        self.thickness = thickness;
        self.set_color(color);
    }

    /// Arm a glyph for the next press.
    pub fn select_glyph(&mut self, symbol: impl Into<String>) {
        self.mode = ToolMode::Stamp;
        self.pending_symbol = Some(symbol.into());
    }

    /// Take the armed glyph for placement and fall back to drawing.
    pub fn consume_glyph(&mut self) -> Option<String> {
        let symbol = self.pending_symbol.take();
        self.mode = ToolMode::Draw;
        symbol
    }

    pub fn set_rotation(&mut self, degrees: f64) {
        self.rotation_degrees = degrees;
    }

    pub fn set_color(&mut self, color: SerializableColor) {
        self.color = color;
        if let Some(idx) = self.pen_colors.iter().position(|c| *c == color) {
            self.color_index = idx;
        }
    }

    /// Advance to the next configured pen color.
    pub fn cycle_color(&mut self) -> SerializableColor {
        if self.pen_colors.is_empty() {
            return self.color;
        }
        self.color_index = (self.color_index + 1) % self.pen_colors.len();
        self.color = self.pen_colors[self.color_index];
        self.color
    }

    pub fn update_pointer(&mut self, point: Point) {
        self.pointer = point;
    }
}
