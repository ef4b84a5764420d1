//! PNG export of committed content.

use crate::raster::RasterSurface;
use crate::scene::{RenderOptions, SceneRenderer};
use crate::surface::RenderError;
use ab_glyph::FontArc;
use sketchpad_core::{HistoryStore, SketchpadConfig};
use std::path::Path;
use thiserror::Error;

/// Export errors.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Render error: {0}")]
    Render(#[from] RenderError),
    #[error("PNG encoding error: {0}")]
    Encode(#[from] png::EncodingError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// An encoded PNG image.
#[derive(Debug, Clone)]
pub struct PngExport {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl PngExport {
    /// Write the encoded bytes to `path`.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ExportError> {
        let path = path.as_ref();
        std::fs::write(path, &self.data)?;
        log::info!("Saved {}x{} PNG to {}", self.width, self.height, path.display());
        Ok(())
    }
}

/// Render the committed history at export scale and encode it as PNG.
///
/// The tool preview is never part of the image.
pub fn export_png(
    history: &HistoryStore,
    config: &SketchpadConfig,
    font: Option<FontArc>,
) -> Result<PngExport, ExportError> {
    let (width, height) = config
        .export_size()
        .ok_or(RenderError::SurfaceUnavailable {
            width: config.canvas_width.saturating_mul(config.export_scale),
            height: config.canvas_height.saturating_mul(config.export_scale),
        })?;
    let mut surface = RasterSurface::new(width, height)?;
    if let Some(font) = font {
        surface = surface.with_font(font);
    }

    let renderer = SceneRenderer::new(RenderOptions::for_export(config));
    renderer.render(&mut surface, history, None);

    let data = encode_png(&surface.to_rgba(), width, height)?;
    log::info!("PNG export complete: {} entries, {} bytes", history.len(), data.len());
    Ok(PngExport { data, width, height })
}

/// Encode RGBA pixel data to PNG bytes.
pub fn encode_png(rgba_data: &[u8], width: u32, height: u32) -> Result<Vec<u8>, ExportError> {
    let mut png_data = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut png_data, width, height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);

        let mut writer = encoder.write_header()?;
        writer.write_image_data(rgba_data)?;
    }
    Ok(png_data)
}
