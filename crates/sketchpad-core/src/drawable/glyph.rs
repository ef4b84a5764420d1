//! Stamped glyph (sticker).

use super::DrawableId;
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A symbol stamped at a position with a rotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Glyph {
    pub(crate) id: DrawableId,
    /// Where the symbol is drawn; rotation pivots here.
    pub anchor: Point,
    /// One rendered unit, possibly several codepoints (e.g. an emoji sequence).
    pub symbol: String,
    /// Clockwise rotation in degrees.
    pub rotation_degrees: f64,
    /// True only for the transient tool preview.
    pub is_preview: bool,
}

impl Glyph {
    /// Create a committed glyph.
    pub fn new(anchor: Point, symbol: impl Into<String>, rotation_degrees: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            anchor,
            symbol: symbol.into(),
            rotation_degrees,
            is_preview: false,
        }
    }

    /// Create the cursor-following preview instance.
    pub fn preview(anchor: Point, symbol: impl Into<String>, rotation_degrees: f64) -> Self {
        Self {
            is_preview: true,
            ..Self::new(anchor, symbol, rotation_degrees)
        }
    }

    pub fn id(&self) -> DrawableId {
        self.id
    }

    pub fn move_to(&mut self, anchor: Point) {
        self.anchor = anchor;
    }

    /// Square of side `size` centred on the anchor (rotation ignored).
    pub fn bounds(&self, size: f64) -> Rect {
        Rect::from_center_size(self.anchor, (size, size))
    }
}
