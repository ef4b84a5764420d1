//! Ephemeral tool preview that follows the pointer.

use crate::drawable::{Glyph, SerializableColor};
use crate::tools::{ToolMode, ToolState};
use kurbo::Point;

/// The uncommitted visual for the current tool.
#[derive(Debug, Clone, PartialEq)]
pub enum Preview {
    /// Filled circle the size of the pen tip.
    Cursor {
        center: Point,
        diameter: f64,
        color: SerializableColor,
    },
    /// The armed glyph, drawn faded.
    Glyph(Glyph),
}

impl Preview {
    pub fn position(&self) -> Point {
        match self {
            Preview::Cursor { center, .. } => *center,
            Preview::Glyph(g) => g.anchor,
        }
    }
}

/// Holds at most one preview and keeps it in sync with the tool state.
#[derive(Debug, Clone, Default)]
pub struct PreviewRenderer {
    preview: Option<Preview>,
}

impl PreviewRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a fresh preview for the current tool at the last pointer position.
    pub fn regenerate(&mut self, tools: &ToolState) {
        let at = tools.pointer();
        self.preview = match (tools.mode(), tools.pending_symbol()) {
            (ToolMode::Stamp, Some(symbol)) => {
                Some(Preview::Glyph(Glyph::preview(at, symbol, tools.rotation_degrees)))
            }
            _ => Some(Preview::Cursor {
                center: at,
                diameter: tools.thickness,
                color: tools.color,
            }),
        };
    }

    /// Move the existing preview, if any, without rebuilding it.
    pub fn follow(&mut self, point: Point) {
        match &mut self.preview {
            Some(Preview::Cursor { center, .. }) => *center = point,
            Some(Preview::Glyph(glyph)) => glyph.move_to(point),
            None => {}
        }
    }

    pub fn clear(&mut self) {
        self.preview = None;
    }

    pub fn current(&self) -> Option<&Preview> {
        self.preview.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.preview.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pen_preview_is_cursor() {
        let mut tools = ToolState::default();
        tools.update_pointer(Point::new(10.0, 20.0));
        tools.select_pen(5.0, SerializableColor::black());

        let mut preview = PreviewRenderer::new();
        preview.regenerate(&tools);
        assert_eq!(
            preview.current(),
            Some(&Preview::Cursor {
                center: Point::new(10.0, 20.0),
                diameter: 5.0,
                color: SerializableColor::black(),
            })
        );
    }

    #[test]
    fn test_glyph_preview_is_marked_preview() {
        let mut tools = ToolState::default();
        tools.select_glyph("⭐");
        tools.set_rotation(45.0);

        let mut preview = PreviewRenderer::new();
        preview.regenerate(&tools);
        match preview.current() {
            Some(Preview::Glyph(glyph)) => {
                assert!(glyph.is_preview);
                assert_eq!(glyph.symbol, "⭐");
                assert_eq!(glyph.rotation_degrees, 45.0);
            }
            other => panic!("expected glyph preview, got {other:?}"),
        }
    }

    #[test]
    fn test_follow_mutates_in_place() {
        let mut tools = ToolState::default();
        tools.select_glyph("😀");
        let mut preview = PreviewRenderer::new();
        preview.regenerate(&tools);
        let id = match preview.current() {
            Some(Preview::Glyph(g)) => g.id(),
            _ => unreachable!(),
        };

        preview.follow(Point::new(7.0, 8.0));
        match preview.current() {
            Some(Preview::Glyph(g)) => {
                assert_eq!(g.id(), id);
                assert_eq!(g.anchor, Point::new(7.0, 8.0));
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_follow_without_preview_does_nothing() {
        let mut preview = PreviewRenderer::new();
        preview.follow(Point::new(1.0, 1.0));
        assert!(preview.is_empty());
    }
}
