//! UI actions emitted by the toolbar, canvas and keyboard.

use kurbo::Point;
use serde::{Deserialize, Serialize};
use sketchpad_core::PointerEvent;

/// Actions a front end can request from the app.
///
/// Scripts are JSON arrays of these, tagged by `type`:
/// `{"type": "pointer_down", "x": 4.0, "y": 8.0}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UiAction {
    PointerDown { x: f64, y: f64 },
    PointerMove { x: f64, y: f64 },
    PointerUp { x: f64, y: f64 },
    /// Pointer left the canvas.
    PointerLeave,
    PointerCancel,
    /// Thin marker in the current color.
    ThinMarker,
    /// Thick marker in the current color.
    ThickMarker,
    /// Pen with an explicit width and optional `#rrggbb` color.
    SelectPen {
        thickness: f64,
        #[serde(default)]
        color: Option<String>,
    },
    /// Select the palette glyph at `index` for the next placement.
    SelectGlyph { index: usize },
    /// Add a custom glyph to the palette and select it.
    RegisterGlyph { symbol: String },
    /// Set glyph rotation in degrees.
    Rotate { degrees: f64 },
    /// Set the pen color from `#rrggbb` or `#rrggbbaa`.
    SetColor { hex: String },
    /// Advance to the next palette pen color.
    CycleColor,
    Undo,
    Redo,
    Clear,
    /// Render committed content to PNG.
    Export,
    /// A key press, resolved through the shortcut registry.
    Key {
        key: String,
        #[serde(default)]
        ctrl: bool,
        #[serde(default)]
        shift: bool,
    },
}

impl UiAction {
    /// Pointer actions as core pointer events.
    pub fn pointer_event(&self) -> Option<PointerEvent> {
        match *self {
            UiAction::PointerDown { x, y } => Some(PointerEvent::Down {
                position: Point::new(x, y),
            }),
            UiAction::PointerMove { x, y } => Some(PointerEvent::Move {
                position: Point::new(x, y),
            }),
            UiAction::PointerUp { x, y } => Some(PointerEvent::Up {
                position: Point::new(x, y),
            }),
            UiAction::PointerLeave => Some(PointerEvent::Leave),
            UiAction::PointerCancel => Some(PointerEvent::Cancel),
            _ => None,
        }
    }

    /// Whether this action only touches tool state, never history.
    pub fn is_tool_change(&self) -> bool {
        matches!(
            self,
            UiAction::ThinMarker
                | UiAction::ThickMarker
                | UiAction::SelectPen { .. }
                | UiAction::SelectGlyph { .. }
                | UiAction::RegisterGlyph { .. }
                | UiAction::Rotate { .. }
                | UiAction::SetColor { .. }
                | UiAction::CycleColor
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tagged_actions() {
        let actions: Vec<UiAction> = serde_json::from_str(
            r##"[
                {"type": "pointer_down", "x": 1.0, "y": 2.0},
                {"type": "select_pen", "thickness": 3.0},
                {"type": "set_color", "hex": "#ff0000"},
                {"type": "key", "key": "Z", "ctrl": true},
                {"type": "undo"}
            ]"##,
        )
        .unwrap();
        assert_eq!(actions[0], UiAction::PointerDown { x: 1.0, y: 2.0 });
        assert_eq!(actions[1], UiAction::SelectPen { thickness: 3.0, color: None });
        assert_eq!(
            actions[3],
            UiAction::Key {
                key: "Z".into(),
                ctrl: true,
                shift: false
            }
        );
        assert_eq!(actions[4], UiAction::Undo);
    }

    #[test]
    fn test_pointer_event_mapping() {
        assert_eq!(
            UiAction::PointerMove { x: 3.0, y: 4.0 }.pointer_event(),
            Some(PointerEvent::Move {
                position: Point::new(3.0, 4.0)
            })
        );
        assert_eq!(UiAction::PointerLeave.pointer_event(), Some(PointerEvent::Leave));
        assert_eq!(UiAction::Undo.pointer_event(), None);
    }

    #[test]
    fn test_tool_change_classification() {
        assert!(UiAction::CycleColor.is_tool_change());
        assert!(UiAction::Rotate { degrees: 10.0 }.is_tool_change());
        assert!(!UiAction::Undo.is_tool_change());
        assert!(!UiAction::PointerDown { x: 0.0, y: 0.0 }.is_tool_change());
    }
}
