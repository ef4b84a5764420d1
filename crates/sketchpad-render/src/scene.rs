//! Full-scene rendering from history and preview.

use crate::surface::Surface;
use kurbo::{Affine, Point, Rect};
use peniko::Color;
use sketchpad_core::{
    Drawable, Glyph, HistoryStore, Preview, SerializableColor, SketchpadConfig, SketchpadSession, Stroke,
};

/// Per-frame rendering parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    /// Uniform scale from canvas to surface pixels.
    pub scale: f64,
    pub background: Color,
    /// Glyph size in canvas pixels.
    pub glyph_size: f64,
    /// Opacity of the preview relative to committed content.
    pub preview_opacity: f64,
    /// Draw the tool preview overlay.
    pub include_preview: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::from_config(&SketchpadConfig::default())
    }
}

impl RenderOptions {
    /// On-screen options for `config`.
    pub fn from_config(config: &SketchpadConfig) -> Self {
        Self {
            scale: 1.0,
            background: config.background.into(),
            glyph_size: config.glyph_size,
            preview_opacity: config.preview_opacity,
            include_preview: true,
        }
    }

    /// Export options for `config`: scaled up, committed content only.
    pub fn for_export(config: &SketchpadConfig) -> Self {
        Self::from_config(config)
            .with_scale(config.export_scale as f64)
            .with_preview(false)
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_preview(mut self, include: bool) -> Self {
        self.include_preview = include;
        self
    }
}

/// Redraws the whole canvas on every change.
///
/// Output depends only on the history, the preview and the options, so the
/// same inputs always produce the same surface calls.
#[derive(Debug, Clone, Default)]
pub struct SceneRenderer {
    options: RenderOptions,
}

impl SceneRenderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Render a session's current state.
    pub fn render_session(&self, surface: &mut dyn Surface, session: &SketchpadSession) {
        self.render(surface, session.history(), session.preview().current());
    }

    /// Clear, paint the background, draw committed entries in order, then the
    /// preview if no stroke is in progress.
    pub fn render(&self, surface: &mut dyn Surface, history: &HistoryStore, preview: Option<&Preview>) {
        let transform = Affine::scale(self.options.scale);

        surface.clear(surface.size().to_rect());
        surface.fill_background(self.options.background);

        let canvas = surface.size().to_rect();
        for drawable in history.snapshot() {
            if !self.is_visible(drawable, canvas, transform) {
                continue;
            }
            match drawable {
                Drawable::Stroke(stroke) => self.render_stroke(surface, stroke, transform),
                Drawable::Glyph(glyph) => self.render_glyph(surface, glyph, transform),
            }
        }

        if self.options.include_preview && !history.is_drawing() {
            if let Some(preview) = preview {
                self.render_preview(surface, preview, transform);
            }
        }
    }

    /// Whether any part of `drawable` can land on `canvas` (surface pixels).
    fn is_visible(&self, drawable: &Drawable, canvas: Rect, transform: Affine) -> bool {
        let margin = match drawable {
            Drawable::Stroke(stroke) => stroke.thickness / 2.0,
            // A rotated square overhangs its upright bounds by under a quarter side.
            Drawable::Glyph(_) => self.options.glyph_size / 4.0,
        };
        let bounds = drawable.bounds(self.options.glyph_size).inflate(margin, margin);
        let bounds = transform.transform_rect_bbox(bounds);
        bounds.x1 >= canvas.x0 && bounds.x0 <= canvas.x1 && bounds.y1 >= canvas.y0 && bounds.y0 <= canvas.y1
    }

    fn render_stroke(&self, surface: &mut dyn Surface, stroke: &Stroke, transform: Affine) {
        if !stroke.is_renderable() {
            return;
        }
        let points: Vec<Point> = stroke.points().iter().map(|p| transform * *p).collect();
        surface.stroke_polyline(&points, stroke.thickness * self.options.scale, stroke.color.into());
    }

    fn render_glyph(&self, surface: &mut dyn Surface, glyph: &Glyph, transform: Affine) {
        let opacity = if glyph.is_preview {
            self.options.preview_opacity
        } else {
            1.0
        };
        surface.fill_glyph(
            &glyph.symbol,
            transform * glyph.anchor,
            self.options.glyph_size * self.options.scale,
            glyph.rotation_degrees,
            opacity,
        );
    }

    fn render_preview(&self, surface: &mut dyn Surface, preview: &Preview, transform: Affine) {
        match preview {
            Preview::Cursor { center, diameter, color } => {
                let faded: SerializableColor = color.with_opacity(self.options.preview_opacity);
                surface.fill_circle(
                    transform * *center,
                    diameter * self.options.scale / 2.0,
                    faded.into(),
                );
            }
            Preview::Glyph(glyph) => self.render_glyph(surface, glyph, transform),
        }
    }
}
