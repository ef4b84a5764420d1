//! Sketchpad Application
//!
//! The application shell: UI actions, the glyph palette, keyboard shortcuts
//! and headless script replay on top of a sketchpad session.

mod app;
mod palette;
mod script;
mod shortcuts;
mod ui;

pub use app::{AppError, SketchpadApp};
pub use palette::{GlyphPalette, PaletteError};
pub use script::{Script, ScriptError};
pub use shortcuts::{Shortcut, ShortcutRegistry};
pub use ui::UiAction;
