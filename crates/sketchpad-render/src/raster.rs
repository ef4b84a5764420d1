//! CPU raster surface backed by tiny-skia.

use crate::surface::{RenderError, RenderResult, Surface};
use ab_glyph::{Font, FontArc, GlyphId, PxScale, ScaleFont};
use kurbo::{Point, Rect, Size};
use peniko::Color;
use std::path::Path;
use tiny_skia::{
    BlendMode, FillRule, FilterQuality, LineCap, LineJoin, Paint, PathBuilder, Pixmap, PixmapPaint,
    PremultipliedColorU8, Stroke, Transform,
};

fn to_skia(color: Color) -> tiny_skia::Color {
    let rgba = color.to_rgba8();
    tiny_skia::Color::from_rgba8(rgba.r, rgba.g, rgba.b, rgba.a)
}

fn solid_paint(color: Color) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(to_skia(color));
    paint.anti_alias = true;
    paint
}

/// Load a TrueType/OpenType font for glyph rendering.
pub fn load_font(path: impl AsRef<Path>) -> RenderResult<FontArc> {
    let path = path.as_ref();
    let data = std::fs::read(path)?;
    FontArc::try_from_vec(data).map_err(|e| RenderError::Font(format!("{}: {}", path.display(), e)))
}

/// An off-screen pixmap.
pub struct RasterSurface {
    pixmap: Pixmap,
    font: Option<FontArc>,
    /// Set once the missing-font warning has been logged.
    warned_no_font: bool,
}

impl std::fmt::Debug for RasterSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RasterSurface")
            .field("width", &self.pixmap.width())
            .field("height", &self.pixmap.height())
            .field("has_font", &self.font.is_some())
            .finish()
    }
}

impl RasterSurface {
    /// Allocate a transparent `width` x `height` surface.
    pub fn new(width: u32, height: u32) -> RenderResult<Self> {
        let pixmap = Pixmap::new(width, height).ok_or(RenderError::SurfaceUnavailable { width, height })?;
        Ok(Self {
            pixmap,
            font: None,
            warned_no_font: false,
        })
    }

    /// Use `font` for glyphs. Without one, glyphs are skipped.
    pub fn with_font(mut self, font: FontArc) -> Self {
        self.font = Some(font);
        self
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Straight (non-premultiplied) RGBA pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let c = self.pixmap.pixel(x, y)?.demultiply();
        Some([c.red(), c.green(), c.blue(), c.alpha()])
    }

    /// Straight RGBA bytes, row-major.
    pub fn to_rgba(&self) -> Vec<u8> {
        self.pixmap
            .pixels()
            .iter()
            .flat_map(|p| {
                let c = p.demultiply();
                [c.red(), c.green(), c.blue(), c.alpha()]
            })
            .collect()
    }

    /// Rasterize `symbol` into its own pixmap, one glyph after another on a
    /// baseline. Returns `None` when nothing in the symbol has an outline.
    fn rasterize_symbol(font: &FontArc, symbol: &str, size: f64) -> Option<Pixmap> {
        let scale = PxScale::from(size as f32);
        let scaled = font.as_scaled(scale);

        let mut glyphs = Vec::new();
        let mut caret = 0.0f32;
        let mut prev: Option<GlyphId> = None;
        for ch in symbol.chars() {
            let id = font.glyph_id(ch);
            // Joiners and variation selectors map to .notdef; skip them.
            if id.0 == 0 {
                continue;
            }
            if let Some(prev) = prev {
                caret += scaled.kern(prev, id);
            }
            glyphs.push(id.with_scale_and_position(scale, ab_glyph::point(caret, scaled.ascent())));
            caret += scaled.h_advance(id);
            prev = Some(id);
        }
        if glyphs.is_empty() {
            return None;
        }

        let width = caret.ceil().max(1.0) as u32;
        let height = scaled.height().ceil().max(1.0) as u32;
        let mut pixmap = Pixmap::new(width, height)?;
        let pixels = pixmap.pixels_mut();

        for glyph in glyphs {
            let Some(outlined) = font.outline_glyph(glyph) else {
                continue;
            };
            let bounds = outlined.px_bounds();
            outlined.draw(|px, py, coverage| {
                let x = bounds.min.x as i32 + px as i32;
                let y = bounds.min.y as i32 + py as i32;
                if x < 0 || y < 0 || x >= width as i32 || y >= height as i32 {
                    return;
                }
                let idx = y as usize * width as usize + x as usize;
                let alpha = (coverage.clamp(0.0, 1.0) * 255.0).round() as u8;
                if alpha > pixels[idx].alpha() {
                    // Black, premultiplied: every channel but alpha stays zero.
                    if let Some(c) = PremultipliedColorU8::from_rgba(0, 0, 0, alpha) {
                        pixels[idx] = c;
                    }
                }
            });
        }
        Some(pixmap)
    }
}

impl Surface for RasterSurface {
    fn size(&self) -> Size {
        Size::new(self.pixmap.width() as f64, self.pixmap.height() as f64)
    }

    fn clear(&mut self, region: Rect) {
        let Some(rect) = tiny_skia::Rect::from_ltrb(
            region.x0 as f32,
            region.y0 as f32,
            region.x1 as f32,
            region.y1 as f32,
        ) else {
            return;
        };
        let mut paint = Paint::default();
        paint.blend_mode = BlendMode::Clear;
        paint.anti_alias = false;
        self.pixmap.fill_rect(rect, &paint, Transform::identity(), None);
    }

    fn fill_background(&mut self, color: Color) {
        self.pixmap.fill(to_skia(color));
    }

    fn stroke_polyline(&mut self, points: &[Point], width: f64, color: Color) {
        let [first, rest @ ..] = points else {
            return;
        };
        if rest.is_empty() {
            return;
        }
        let mut pb = PathBuilder::new();
        pb.move_to(first.x as f32, first.y as f32);
        for p in rest {
            pb.line_to(p.x as f32, p.y as f32);
        }
        let Some(path) = pb.finish() else {
            return;
        };
        let stroke = Stroke {
            width: width as f32,
            line_cap: LineCap::Round,
            line_join: LineJoin::Round,
            ..Stroke::default()
        };
        self.pixmap
            .stroke_path(&path, &solid_paint(color), &stroke, Transform::identity(), None);
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Color) {
        let Some(path) = PathBuilder::from_circle(center.x as f32, center.y as f32, radius as f32) else {
            return;
        };
        self.pixmap.fill_path(
            &path,
            &solid_paint(color),
            FillRule::Winding,
            Transform::identity(),
            None,
        );
    }

    fn fill_glyph(&mut self, symbol: &str, anchor: Point, size: f64, rotation_degrees: f64, opacity: f64) {
        let Some(font) = &self.font else {
            if !self.warned_no_font {
                log::warn!("No glyph font configured; glyphs will not be rasterized");
                self.warned_no_font = true;
            }
            return;
        };
        let Some(glyph) = Self::rasterize_symbol(font, symbol, size) else {
            log::debug!("Font has no outlines for {:?}", symbol);
            return;
        };

        let transform = Transform::from_translate(anchor.x as f32, anchor.y as f32)
            .pre_rotate(rotation_degrees as f32);
        let paint = PixmapPaint {
            opacity: opacity.clamp(0.0, 1.0) as f32,
            blend_mode: BlendMode::SourceOver,
            quality: FilterQuality::Bilinear,
        };
        // Centre the glyph box on the anchor; the transform pivots there.
        let dx = -(glyph.width() as i32) / 2;
        let dy = -(glyph.height() as i32) / 2;
        self.pixmap.draw_pixmap(dx, dy, glyph.as_ref(), &paint, transform, None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_dark(px: [u8; 4]) -> bool {
        px[0] < 128 && px[1] < 128 && px[2] < 128 && px[3] > 200
    }

    #[test]
    fn test_zero_size_surface_unavailable() {
        assert!(matches!(
            RasterSurface::new(0, 10),
            Err(RenderError::SurfaceUnavailable { width: 0, height: 10 })
        ));
    }

    #[test]
    fn test_background_fill() {
        let mut surface = RasterSurface::new(8, 8).unwrap();
        surface.fill_background(Color::WHITE);
        assert_eq!(surface.pixel(3, 3), Some([255, 255, 255, 255]));
    }

    #[test]
    fn test_clear_makes_transparent() {
        let mut surface = RasterSurface::new(8, 8).unwrap();
        surface.fill_background(Color::WHITE);
        surface.clear(Rect::new(0.0, 0.0, 8.0, 8.0));
        assert_eq!(surface.pixel(4, 4).map(|p| p[3]), Some(0));
    }

    #[test]
    fn test_polyline_is_stroked() {
        let mut surface = RasterSurface::new(64, 64).unwrap();
        surface.fill_background(Color::WHITE);
        surface.stroke_polyline(&[Point::new(0.0, 0.0), Point::new(40.0, 40.0)], 8.0, Color::BLACK);

        assert!(is_dark(surface.pixel(20, 20).unwrap()));
        assert_eq!(surface.pixel(60, 5), Some([255, 255, 255, 255]));
    }

    #[test]
    fn test_single_point_polyline_draws_nothing() {
        let mut surface = RasterSurface::new(16, 16).unwrap();
        surface.fill_background(Color::WHITE);
        surface.stroke_polyline(&[Point::new(8.0, 8.0)], 8.0, Color::BLACK);
        assert_eq!(surface.pixel(8, 8), Some([255, 255, 255, 255]));
    }

    #[test]
    fn test_circle_fill() {
        let mut surface = RasterSurface::new(16, 16).unwrap();
        surface.fill_background(Color::WHITE);
        surface.fill_circle(Point::new(8.0, 8.0), 4.0, Color::BLACK);
        assert!(is_dark(surface.pixel(8, 8).unwrap()));
        assert_eq!(surface.pixel(0, 0), Some([255, 255, 255, 255]));
    }

    #[test]
    fn test_glyph_without_font_is_skipped() {
        let mut surface = RasterSurface::new(16, 16).unwrap();
        surface.fill_background(Color::WHITE);
        surface.fill_glyph("⭐", Point::new(8.0, 8.0), 12.0, 0.0, 1.0);
        surface.fill_glyph("⭐", Point::new(8.0, 8.0), 12.0, 0.0, 1.0);
        assert!(surface.warned_no_font);
        assert_eq!(surface.pixel(8, 8), Some([255, 255, 255, 255]));
    }

    const FONT_CANDIDATES: &[&str] = &[
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/TTF/DejaVuSans.ttf",
        "/usr/share/fonts/dejavu/DejaVuSans.ttf",
        "/Library/Fonts/Arial.ttf",
        "C:\\Windows\\Fonts\\arial.ttf",
    ];

    /// A system font for glyph tests; `SKETCHPAD_TEST_FONT` overrides the search.
    fn test_font() -> Option<FontArc> {
        let path = std::env::var_os("SKETCHPAD_TEST_FONT")
            .map(std::path::PathBuf::from)
            .or_else(|| {
                FONT_CANDIDATES
                    .iter()
                    .map(std::path::PathBuf::from)
                    .find(|p| p.exists())
            });
        match path {
            Some(path) => Some(load_font(path).unwrap()),
            None => {
                eprintln!("no test font found; skipping");
                None
            }
        }
    }

    fn glyph_surface(font: &FontArc, symbol: &str, rotation: f64, opacity: f64) -> RasterSurface {
        let mut surface = RasterSurface::new(64, 64).unwrap().with_font(font.clone());
        surface.fill_glyph(symbol, Point::new(32.0, 32.0), 24.0, rotation, opacity);
        surface
    }

    /// Inclusive bounding box of pixels with any coverage.
    fn ink_bounds(surface: &RasterSurface) -> Option<(u32, u32, u32, u32)> {
        let mut bounds: Option<(u32, u32, u32, u32)> = None;
        for y in 0..surface.height() {
            for x in 0..surface.width() {
                if surface.pixel(x, y).unwrap()[3] == 0 {
                    continue;
                }
                bounds = Some(match bounds {
                    None => (x, y, x, y),
                    Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
                });
            }
        }
        bounds
    }

    fn max_alpha(surface: &RasterSurface) -> u8 {
        surface.to_rgba().chunks(4).map(|p| p[3]).max().unwrap_or(0)
    }

    fn assert_centred(bounds: (u32, u32, u32, u32)) {
        let (x0, y0, x1, y1) = bounds;
        let cx = (x0 + x1) as f64 / 2.0;
        let cy = (y0 + y1) as f64 / 2.0;
        assert!((cx - 32.0).abs() <= 3.0, "x centre {cx} in {bounds:?}");
        assert!((cy - 32.0).abs() <= 3.0, "y centre {cy} in {bounds:?}");
    }

    #[test]
    fn test_glyph_centred_on_anchor() {
        let Some(font) = test_font() else { return };
        let surface = glyph_surface(&font, "I", 0.0, 1.0);
        let bounds = ink_bounds(&surface).unwrap();
        assert_centred(bounds);

        // Upright "I" is taller than it is wide.
        let (x0, y0, x1, y1) = bounds;
        assert!(y1 - y0 > x1 - x0);
    }

    #[test]
    fn test_glyph_rotates_about_anchor() {
        let Some(font) = test_font() else { return };
        let upright = glyph_surface(&font, "I", 0.0, 1.0);
        let rotated = glyph_surface(&font, "I", 90.0, 1.0);
        assert_ne!(upright.to_rgba(), rotated.to_rgba());

        let bounds = ink_bounds(&rotated).unwrap();
        assert_centred(bounds);
        let (x0, y0, x1, y1) = bounds;
        assert!(x1 - x0 > y1 - y0);
    }

    #[test]
    fn test_glyph_opacity_scales_coverage() {
        let Some(font) = test_font() else { return };
        let full = max_alpha(&glyph_surface(&font, "I", 0.0, 1.0));
        let faded = max_alpha(&glyph_surface(&font, "I", 0.0, 0.3));
        assert!(full > 200);
        assert!(faded > 0 && faded <= 80, "faded alpha {faded}");
    }

    #[test]
    fn test_notdef_codepoints_skipped() {
        let Some(font) = test_font() else { return };
        assert!(RasterSurface::rasterize_symbol(&font, "\u{10FFFD}", 24.0).is_none());

        let blank = glyph_surface(&font, "\u{10FFFD}", 0.0, 1.0);
        assert_eq!(ink_bounds(&blank), None);
        assert!(!blank.warned_no_font);

        let plain = glyph_surface(&font, "I", 0.0, 1.0);
        let mixed = glyph_surface(&font, "I\u{10FFFD}", 0.0, 1.0);
        assert_eq!(plain.to_rgba(), mixed.to_rgba());
    }

    #[test]
    fn test_to_rgba_length() {
        let surface = RasterSurface::new(4, 3).unwrap();
        assert_eq!(surface.to_rgba().len(), 4 * 3 * 4);
    }

    #[test]
    fn test_load_font_missing_file() {
        assert!(matches!(load_font("/nonexistent/font.ttf"), Err(RenderError::Io(_))));
    }
}
