//! Drawing surface abstraction.

use kurbo::{Point, Rect, Size};
use peniko::Color;
use sketchpad_core::SerializableColor;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Surface unavailable: cannot allocate {width}x{height}")]
    SurfaceUnavailable { width: u32, height: u32 },
    #[error("Font error: {0}")]
    Font(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Primitive drawing operations a backend must provide.
///
/// Coordinates are surface pixels. The scene renderer has already applied any
/// export scaling before calling these.
pub trait Surface {
    /// Surface size in pixels.
    fn size(&self) -> Size;

    /// Reset `region` to fully transparent.
    fn clear(&mut self, region: Rect);

    /// Paint the whole surface with `color`.
    fn fill_background(&mut self, color: Color);

    /// Stroke connected segments through `points`. Fewer than two points draws nothing.
    fn stroke_polyline(&mut self, points: &[Point], width: f64, color: Color);

    /// Fill a circle.
    fn fill_circle(&mut self, center: Point, radius: f64, color: Color);

    /// Draw `symbol` centred on `anchor`, `size` pixels tall, rotated
    /// clockwise about the anchor.
    fn fill_glyph(&mut self, symbol: &str, anchor: Point, size: f64, rotation_degrees: f64, opacity: f64);
}

/// One recorded surface call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Rect),
    Background(SerializableColor),
    Polyline {
        points: Vec<Point>,
        width: f64,
        color: SerializableColor,
    },
    Circle {
        center: Point,
        radius: f64,
        color: SerializableColor,
    },
    Glyph {
        symbol: String,
        anchor: Point,
        size: f64,
        rotation_degrees: f64,
        opacity: f64,
    },
}

/// Surface that records calls instead of drawing them.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    size: Size,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            size: Size::new(width, height),
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Take the recorded commands, leaving the surface empty.
    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> Size {
        self.size
    }

    fn clear(&mut self, region: Rect) {
        // Anything drawn before a full clear is invisible.
        if region.union(self.size.to_rect()) == region {
            self.commands.clear();
        }
        self.commands.push(DrawCommand::Clear(region));
    }

    fn fill_background(&mut self, color: Color) {
        self.commands.push(DrawCommand::Background(color.into()));
    }

    fn stroke_polyline(&mut self, points: &[Point], width: f64, color: Color) {
        if points.len() < 2 {
            return;
        }
        self.commands.push(DrawCommand::Polyline {
            points: points.to_vec(),
            width,
            color: color.into(),
        });
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Color) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color: color.into(),
        });
    }

    fn fill_glyph(&mut self, symbol: &str, anchor: Point, size: f64, rotation_degrees: f64, opacity: f64) {
        self.commands.push(DrawCommand::Glyph {
            symbol: symbol.to_string(),
            anchor,
            size,
            rotation_degrees,
            opacity,
        });
    }
}
