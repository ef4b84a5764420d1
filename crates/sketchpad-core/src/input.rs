//! Pointer events and the gesture state machine.

use crate::history::{HistoryStore, StrokeHandle};
use crate::preview::PreviewRenderer;
use crate::tools::{ToolMode, ToolState};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Pointer event in surface-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down { position: Point },
    Move { position: Point },
    Up { position: Point },
    /// Pointer left the canvas; ends any drag like `Up`.
    Leave,
    /// Platform cancelled the gesture; same as `Leave`.
    Cancel,
}

/// Active gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GestureState {
    #[default]
    Idle,
    /// Dragging out a stroke.
    Drawing(StrokeHandle),
    /// Placing a glyph. Only ever observed inside a single `Down`.
    Stamping,
}

/// Turns pointer events into history and tool mutations.
#[derive(Debug, Clone, Default)]
pub struct InputController {
    state: GestureState,
}

impl InputController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> GestureState {
        self.state
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self.state, GestureState::Drawing(_))
    }

    /// Apply one event. Returns true when the scene changed and needs a redraw.
    pub fn handle(
        &mut self,
        event: PointerEvent,
        history: &mut HistoryStore,
        tools: &mut ToolState,
        preview: &mut PreviewRenderer,
    ) -> bool {
        match event {
            PointerEvent::Down { position } => {
                tools.update_pointer(position);
                // A release we never saw (e.g. outside the window) ends the old drag.
                self.end_drag(history);

                if let Some(symbol) = tools.consume_glyph() {
                    self.state = GestureState::Stamping;
                    history.place_glyph(position, symbol, tools.rotation_degrees);
                    preview.clear();
                    self.state = GestureState::Idle;
                } else {
                    let handle = history.begin_stroke(position, tools.thickness, tools.color);
                    self.state = GestureState::Drawing(handle);
                }
                true
            }
            PointerEvent::Move { position } => {
                tools.update_pointer(position);
                if let GestureState::Drawing(handle) = self.state {
                    if history.extend_stroke(handle, position) {
                        return true;
                    }
                    // Stroke was undone or cleared mid-drag.
                    self.state = GestureState::Idle;
                }
                if preview.is_empty() && tools.mode() == ToolMode::Draw {
                    preview.regenerate(tools);
                } else {
                    preview.follow(position);
                }
                true
            }
            PointerEvent::Up { position } => {
                tools.update_pointer(position);
                self.release(history, preview, tools)
            }
            PointerEvent::Leave | PointerEvent::Cancel => self.release(history, preview, tools),
        }
    }

    fn release(&mut self, history: &mut HistoryStore, preview: &mut PreviewRenderer, tools: &ToolState) -> bool {
        if !self.end_drag(history) {
            return false;
        }
        preview.follow(tools.pointer());
        true
    }

    /// Finalize the live stroke, if any. Returns whether a drag was active.
    fn end_drag(&mut self, history: &mut HistoryStore) -> bool {
        match std::mem::take(&mut self.state) {
            GestureState::Drawing(handle) => {
                history.finalize_stroke(handle);
                true
            }
            GestureState::Idle | GestureState::Stamping => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drawable::Drawable;
    use crate::preview::Preview;

    struct Harness {
        input: InputController,
        history: HistoryStore,
        tools: ToolState,
        preview: PreviewRenderer,
    }

    impl Harness {
        fn new() -> Self {
            let tools = ToolState::default();
            let mut preview = PreviewRenderer::new();
            preview.regenerate(&tools);
            Self {
                input: InputController::new(),
                history: HistoryStore::new(),
                tools,
                preview,
            }
        }

        fn send(&mut self, event: PointerEvent) -> bool {
            self.input
                .handle(event, &mut self.history, &mut self.tools, &mut self.preview)
        }

        fn down(&mut self, x: f64, y: f64) -> bool {
            self.send(PointerEvent::Down { position: Point::new(x, y) })
        }

        fn drag(&mut self, x: f64, y: f64) -> bool {
            self.send(PointerEvent::Move { position: Point::new(x, y) })
        }

        fn up(&mut self, x: f64, y: f64) -> bool {
            self.send(PointerEvent::Up { position: Point::new(x, y) })
        }
    }

    #[test]
    fn test_press_drag_release_draws_stroke() {
        let mut h = Harness::new();
        assert!(h.down(0.0, 0.0));
        assert!(h.input.is_drawing());
        assert!(h.drag(5.0, 5.0));
        assert!(h.drag(10.0, 10.0));
        assert!(h.up(10.0, 10.0));

        assert_eq!(h.input.state(), GestureState::Idle);
        let stroke = h.history.snapshot()[0].as_stroke().unwrap();
        assert_eq!(
            stroke.points(),
            &[Point::new(0.0, 0.0), Point::new(5.0, 5.0), Point::new(10.0, 10.0)]
        );
    }

    #[test]
    fn test_moves_after_release_do_not_extend() {
        let mut h = Harness::new();
        h.down(0.0, 0.0);
        h.drag(10.0, 10.0);
        h.up(10.0, 10.0);
        let before = h.history.snapshot().to_vec();

        assert!(h.drag(50.0, 50.0));
        assert_eq!(h.history.snapshot(), before.as_slice());
        assert_eq!(h.preview.current().map(Preview::position), Some(Point::new(50.0, 50.0)));
    }

    #[test]
    fn test_glyph_press_places_and_stays_idle() {
        let mut h = Harness::new();
        h.tools.select_glyph("⭐");
        h.tools.set_rotation(30.0);
        h.preview.regenerate(&h.tools);

        assert!(h.down(5.0, 5.0));
        assert_eq!(h.input.state(), GestureState::Idle);
        assert!(h.tools.pending_symbol().is_none());
        assert!(h.preview.is_empty());

        match &h.history.snapshot()[0] {
            Drawable::Glyph(g) => {
                assert_eq!(g.symbol, "⭐");
                assert_eq!(g.anchor, Point::new(5.0, 5.0));
                assert_eq!(g.rotation_degrees, 30.0);
                assert!(!g.is_preview);
            }
            other => panic!("expected glyph, got {other:?}"),
        }

        // The release after a placement is not a drag end.
        assert!(!h.up(5.0, 5.0));
    }

    #[test]
    fn test_move_after_placement_restores_cursor() {
        let mut h = Harness::new();
        h.tools.select_glyph("😀");
        h.down(5.0, 5.0);
        assert!(h.preview.is_empty());

        h.drag(8.0, 9.0);
        assert!(matches!(
            h.preview.current(),
            Some(Preview::Cursor { center, .. }) if *center == Point::new(8.0, 9.0)
        ));
    }

    #[test]
    fn test_leave_ends_drag() {
        let mut h = Harness::new();
        h.down(0.0, 0.0);
        h.drag(3.0, 3.0);
        assert!(h.send(PointerEvent::Leave));
        assert!(!h.input.is_drawing());
        assert!(!h.history.is_drawing());

        h.drag(9.0, 9.0);
        assert_eq!(h.history.snapshot()[0].as_stroke().unwrap().len(), 2);
    }

    #[test]
    fn test_cancel_ends_drag() {
        let mut h = Harness::new();
        h.down(0.0, 0.0);
        assert!(h.send(PointerEvent::Cancel));
        assert_eq!(h.input.state(), GestureState::Idle);
    }

    #[test]
    fn test_up_while_idle_is_noop() {
        let mut h = Harness::new();
        assert!(!h.up(1.0, 1.0));
        assert!(h.history.is_empty());
    }

    #[test]
    fn test_clear_mid_drag_returns_to_idle() {
        let mut h = Harness::new();
        h.down(0.0, 0.0);
        h.history.clear();

        assert!(h.drag(4.0, 4.0));
        assert_eq!(h.input.state(), GestureState::Idle);
        assert!(h.history.is_empty());
    }

    #[test]
    fn test_missed_release_finalizes_previous_stroke() {
        let mut h = Harness::new();
        h.down(0.0, 0.0);
        h.drag(1.0, 1.0);
        h.down(20.0, 20.0);
        h.drag(21.0, 21.0);

        assert_eq!(h.history.len(), 2);
        assert_eq!(h.history.snapshot()[0].as_stroke().unwrap().len(), 2);
        assert_eq!(h.history.snapshot()[1].as_stroke().unwrap().len(), 2);
    }

    #[test]
    fn test_stroke_uses_tool_thickness_and_color() {
        let mut h = Harness::new();
        let red = crate::drawable::SerializableColor::new(255, 0, 0, 255);
        h.tools.select_pen(5.0, red);
        h.down(0.0, 0.0);

        let stroke = h.history.snapshot()[0].as_stroke().unwrap();
        assert_eq!(stroke.thickness, 5.0);
        assert_eq!(stroke.color, red);
    }
}
