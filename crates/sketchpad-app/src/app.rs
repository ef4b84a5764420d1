//! Application shell tying UI actions to a sketchpad session.

use crate::palette::{GlyphPalette, PaletteError};
use crate::shortcuts::ShortcutRegistry;
use crate::ui::UiAction;
use sketchpad_core::{SerializableColor, SketchpadConfig, SketchpadSession};
use sketchpad_render::{ExportError, FontArc, PngExport, RenderOptions, SceneRenderer, Surface, export_png};
use thiserror::Error;

/// Errors from dispatching a UI action.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Palette(#[from] PaletteError),
    #[error("Invalid color {0:?}: expected #rgb, #rrggbb or #rrggbbaa")]
    InvalidColor(String),
    #[error("Invalid pen thickness {0}")]
    InvalidThickness(f64),
    #[error("Export failed: {0}")]
    Export(#[from] ExportError),
}

/// One sketchpad window: session, palette and the on-screen renderer.
pub struct SketchpadApp {
    session: SketchpadSession,
    palette: GlyphPalette,
    renderer: SceneRenderer,
    font: Option<FontArc>,
    last_export: Option<PngExport>,
}

impl Default for SketchpadApp {
    fn default() -> Self {
        Self::new(SketchpadConfig::default(), None)
    }
}

impl SketchpadApp {
    pub fn new(config: SketchpadConfig, font: Option<FontArc>) -> Self {
        let palette = GlyphPalette::new(&config);
        let renderer = SceneRenderer::new(RenderOptions::from_config(&config));
        Self {
            session: SketchpadSession::new(config),
            palette,
            renderer,
            font,
            last_export: None,
        }
    }

    pub fn session(&self) -> &SketchpadSession {
        &self.session
    }

    pub fn palette(&self) -> &GlyphPalette {
        &self.palette
    }

    /// The most recent `Export` result.
    pub fn last_export(&self) -> Option<&PngExport> {
        self.last_export.as_ref()
    }

    /// Redraw the canvas, preview included.
    pub fn render(&self, surface: &mut dyn Surface) {
        self.renderer.render_session(surface, &self.session);
    }

    /// Export committed content at the configured scale.
    pub fn export(&self) -> Result<PngExport, AppError> {
        let config = self.session.config();
        Ok(export_png(self.session.history(), config, self.font.clone())?)
    }

    pub fn handle_action(&mut self, action: UiAction) -> Result<(), AppError> {
        if let Some(event) = action.pointer_event() {
            self.session.handle_pointer(event);
            return Ok(());
        }
        if action.is_tool_change() {
            log::debug!("Tool change {:?}; history untouched", action);
        }

        match action {
            UiAction::ThinMarker => self.session.on_thin_marker(),
            UiAction::ThickMarker => self.session.on_thick_marker(),
            UiAction::SelectPen { thickness, color } => {
                if !(thickness.is_finite() && thickness > 0.0) {
                    return Err(AppError::InvalidThickness(thickness));
                }
                let color = match color {
                    Some(hex) => parse_color(&hex)?,
                    None => self.session.tools().color,
                };
                self.session.on_tool_select(thickness, color);
            }
            UiAction::SelectGlyph { index } => {
                let symbol = self.palette.get(index)?.to_string();
                self.session.on_glyph_select(symbol);
            }
            UiAction::RegisterGlyph { symbol } => {
                let symbol = self.palette.register(&symbol)?.to_string();
                self.session.on_glyph_select(symbol);
            }
            UiAction::Rotate { degrees } => self.session.on_rotation(degrees),
            UiAction::SetColor { hex } => {
                let color = parse_color(&hex)?;
                self.session.on_color(color);
            }
            UiAction::CycleColor => {
                self.session.on_cycle_color();
            }
            UiAction::Undo => {
                if self.session.on_undo() {
                    log::info!("Undo performed");
                }
            }
            UiAction::Redo => {
                if self.session.on_redo() {
                    log::info!("Redo performed");
                }
            }
            UiAction::Clear => {
                self.session.on_clear();
                log::info!("Canvas cleared");
            }
            UiAction::Export => {
                self.last_export = Some(self.export()?);
            }
            UiAction::Key { key, ctrl, shift } => match ShortcutRegistry::resolve(&key, ctrl, shift) {
                Some(action) => return self.handle_action(action),
                None => log::debug!("Unbound key {:?} (ctrl={}, shift={})", key, ctrl, shift),
            },
            UiAction::PointerDown { .. }
            | UiAction::PointerMove { .. }
            | UiAction::PointerUp { .. }
            | UiAction::PointerLeave
            | UiAction::PointerCancel => {}
        }
        Ok(())
    }
}

fn parse_color(hex: &str) -> Result<SerializableColor, AppError> {
    SerializableColor::from_hex(hex).ok_or_else(|| AppError::InvalidColor(hex.to_string()))
}
