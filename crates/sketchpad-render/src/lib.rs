//! Sketchpad Render Library
//!
//! Surface abstraction, full-scene rendering and PNG export for the
//! sketchpad. The raster backend uses tiny-skia.

mod export;
mod raster;
mod scene;
mod surface;

pub use export::{ExportError, PngExport, encode_png, export_png};
pub use raster::{RasterSurface, load_font};
pub use scene::{RenderOptions, SceneRenderer};
pub use surface::{DrawCommand, RecordingSurface, RenderError, RenderResult, Surface};

pub use ab_glyph::FontArc;
