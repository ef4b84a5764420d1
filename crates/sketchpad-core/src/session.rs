//! Per-app sketchpad state.

use crate::config::SketchpadConfig;
use crate::drawable::SerializableColor;
use crate::history::HistoryStore;
use crate::input::{InputController, PointerEvent};
use crate::notify::ChangeNotifier;
use crate::preview::PreviewRenderer;
use crate::tools::ToolState;

/// Everything one sketchpad owns, constructed once per app instance.
///
/// The `on_*` methods are the entry points for UI glue. Each one that changes
/// history or tool state notifies subscribers exactly once.
#[derive(Debug)]
pub struct SketchpadSession {
    config: SketchpadConfig,
    history: HistoryStore,
    tools: ToolState,
    preview: PreviewRenderer,
    input: InputController,
    notifier: ChangeNotifier,
}

impl Default for SketchpadSession {
    fn default() -> Self {
        Self::new(SketchpadConfig::default())
    }
}

impl SketchpadSession {
    pub fn new(config: SketchpadConfig) -> Self {
        let tools = ToolState::new(&config);
        let mut preview = PreviewRenderer::new();
        preview.regenerate(&tools);
        Self {
            config,
            history: HistoryStore::new(),
            tools,
            preview,
            input: InputController::new(),
            notifier: ChangeNotifier::new(),
        }
    }

    pub fn config(&self) -> &SketchpadConfig {
        &self.config
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    pub fn tools(&self) -> &ToolState {
        &self.tools
    }

    pub fn preview(&self) -> &PreviewRenderer {
        &self.preview
    }

    /// Whether a stroke is being dragged; the preview is hidden meanwhile.
    pub fn is_drawing(&self) -> bool {
        self.history.is_drawing()
    }

    /// Register a redraw callback.
    pub fn subscribe(&mut self, observer: impl FnMut() + 'static) {
        self.notifier.subscribe(observer);
    }

    /// Poll for coalesced changes since the last call.
    pub fn take_changed(&mut self) -> bool {
        self.notifier.take_changed()
    }

    pub fn handle_pointer(&mut self, event: PointerEvent) -> bool {
        let changed = self
            .input
            .handle(event, &mut self.history, &mut self.tools, &mut self.preview);
        if changed {
            self.notifier.notify();
        }
        changed
    }

    pub fn on_tool_select(&mut self, thickness: f64, color: SerializableColor) {
        self.tools.select_pen(thickness, color);
        self.refresh_preview();
    }

    /// Thin marker in the current color.
    pub fn on_thin_marker(&mut self) {
        self.on_tool_select(self.config.thin_thickness, self.tools.color);
    }

    /// Thick marker in the current color.
    pub fn on_thick_marker(&mut self) {
        self.on_tool_select(self.config.thick_thickness, self.tools.color);
    }

    pub fn on_glyph_select(&mut self, symbol: impl Into<String>) {
        self.tools.select_glyph(symbol);
        self.refresh_preview();
    }

    pub fn on_rotation(&mut self, degrees: f64) {
        self.tools.set_rotation(degrees);
        self.refresh_preview();
    }

    pub fn on_color(&mut self, color: SerializableColor) {
        self.tools.set_color(color);
        self.refresh_preview();
    }

    pub fn on_cycle_color(&mut self) -> SerializableColor {
        let color = self.tools.cycle_color();
        self.refresh_preview();
        color
    }

    pub fn on_undo(&mut self) -> bool {
        let moved = self.history.undo();
        if moved {
            self.notifier.notify();
        }
        moved
    }

    pub fn on_redo(&mut self) -> bool {
        let moved = self.history.redo();
        if moved {
            self.notifier.notify();
        }
        moved
    }

    pub fn on_clear(&mut self) {
        self.history.clear();
        self.notifier.notify();
    }

    fn refresh_preview(&mut self) {
        self.preview.regenerate(&self.tools);
        self.notifier.notify();
    }
}
