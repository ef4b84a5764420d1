//! Committed drawables and the undo/redo stacks.

use crate::drawable::{Drawable, DrawableId, Glyph, SerializableColor, Stroke};
use kurbo::Point;

/// Identifies the stroke being dragged so points can be appended to it.
///
/// A handle is only an id; it never borrows into the history. It goes stale
/// when the stroke is finalized, undone or cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StrokeHandle(DrawableId);

impl StrokeHandle {
    pub fn id(&self) -> DrawableId {
        self.0
    }
}

/// Owns every drawable: the committed sequence and the redo buffer.
///
/// An entry lives in exactly one of the two stacks. New commits invalidate
/// redo; tool changes never touch either stack.
#[derive(Debug, Clone, Default)]
pub struct HistoryStore {
    /// Committed entries, oldest first.
    committed: Vec<Drawable>,
    /// Undone entries; the last one is redone first.
    undone: Vec<Drawable>,
    /// Stroke currently accepting points.
    live: Option<DrawableId>,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commit a new one-point stroke and return a handle for extending it.
    pub fn begin_stroke(&mut self, origin: Point, thickness: f64, color: SerializableColor) -> StrokeHandle {
        let stroke = Stroke::new(origin, thickness, color);
        let id = stroke.id();
        self.commit(Drawable::Stroke(stroke));
        self.live = Some(id);
        log::debug!("Began stroke {} at ({}, {})", id, origin.x, origin.y);
        StrokeHandle(id)
    }

    /// Append a point to the live stroke.
    ///
    /// Returns false, changing nothing, when the handle is stale.
    pub fn extend_stroke(&mut self, handle: StrokeHandle, point: Point) -> bool {
        if self.live != Some(handle.0) {
            log::trace!("Ignoring point for stale stroke {}", handle.0);
            return false;
        }
        // The live stroke is the most recent commit unless a glyph was placed
        // over it mid-drag, so search from the back.
        let Some(stroke) = self
            .committed
            .iter_mut()
            .rev()
            .find(|d| d.id() == handle.0)
            .and_then(Drawable::as_stroke_mut)
        else {
            self.live = None;
            return false;
        };
        stroke.add_point(point);
        true
    }

    /// Stop accepting points for `handle`.
    pub fn finalize_stroke(&mut self, handle: StrokeHandle) {
        if self.live == Some(handle.0) {
            log::debug!("Finalized stroke {}", handle.0);
            self.live = None;
        }
    }

    /// Commit a glyph.
    pub fn place_glyph(&mut self, anchor: Point, symbol: impl Into<String>, rotation_degrees: f64) -> DrawableId {
        let glyph = Glyph::new(anchor, symbol, rotation_degrees);
        let id = glyph.id();
        log::debug!("Placed glyph {:?} at ({}, {})", glyph.symbol, anchor.x, anchor.y);
        self.commit(Drawable::Glyph(glyph));
        id
    }

    fn commit(&mut self, drawable: Drawable) {
        self.committed.push(drawable);
        if !self.undone.is_empty() {
            log::debug!("Discarding {} redo entries", self.undone.len());
            self.undone.clear();
        }
    }

    /// Move the last committed entry onto the redo stack.
    /// Returns true if an entry moved, false if nothing to undo.
    pub fn undo(&mut self) -> bool {
        if let Some(drawable) = self.committed.pop() {
            if self.live == Some(drawable.id()) {
                self.live = None;
            }
            log::debug!("Undo {}", drawable.id());
            self.undone.push(drawable);
            true
        } else {
            false
        }
    }

    /// Move the last undone entry back to the end of the committed sequence.
    /// Returns true if an entry moved, false if nothing to redo.
    pub fn redo(&mut self) -> bool {
        if let Some(drawable) = self.undone.pop() {
            log::debug!("Redo {}", drawable.id());
            self.committed.push(drawable);
            true
        } else {
            false
        }
    }

    /// Drop everything, including any live stroke.
    pub fn clear(&mut self) {
        log::debug!(
            "Clearing history ({} committed, {} undone)",
            self.committed.len(),
            self.undone.len()
        );
        self.committed.clear();
        self.undone.clear();
        self.live = None;
    }

    /// Committed entries in draw order.
    pub fn snapshot(&self) -> &[Drawable] {
        &self.committed
    }

    /// Redo buffer; the last entry is redone first.
    pub fn undone(&self) -> &[Drawable] {
        &self.undone
    }

    pub fn can_undo(&self) -> bool {
        !self.committed.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.undone.is_empty()
    }

    /// Whether a stroke is currently accepting points.
    pub fn is_drawing(&self) -> bool {
        self.live.is_some()
    }

    pub fn len(&self) -> usize {
        self.committed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.committed.is_empty()
    }

    pub fn undone_len(&self) -> usize {
        self.undone.len()
    }
}
