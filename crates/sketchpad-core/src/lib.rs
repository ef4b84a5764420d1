//! Sketchpad Core Library
//!
//! Drawable history, tool state, preview and pointer handling for the
//! sketchpad. Rendering lives in `sketchpad-render`.

pub mod config;
pub mod drawable;
pub mod history;
pub mod input;
pub mod notify;
pub mod preview;
pub mod session;
pub mod tools;

pub use config::{ConfigError, SketchpadConfig};
pub use drawable::{Drawable, DrawableId, Glyph, SerializableColor, Stroke};
pub use history::{HistoryStore, StrokeHandle};
pub use input::{GestureState, InputController, PointerEvent};
pub use notify::ChangeNotifier;
pub use preview::{Preview, PreviewRenderer};
pub use session::SketchpadSession;
pub use tools::{ToolMode, ToolState};
