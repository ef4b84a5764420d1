//! Glyph palette: the built-in glyphs plus user-registered ones.

use sketchpad_core::SketchpadConfig;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PaletteError {
    #[error("Glyph text is empty")]
    EmptySymbol,
    #[error("No glyph at palette index {index} (palette has {len})")]
    UnknownGlyph { index: usize, len: usize },
}

/// Ordered list of selectable glyphs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphPalette {
    symbols: Vec<String>,
}

impl GlyphPalette {
    pub fn new(config: &SketchpadConfig) -> Self {
        let mut palette = Self { symbols: Vec::new() };
        for symbol in &config.glyphs {
            // Config glyphs go through the same validation as custom ones.
            if let Err(e) = palette.register(symbol) {
                log::warn!("Skipping configured glyph {:?}: {}", symbol, e);
            }
        }
        palette
    }

    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn get(&self, index: usize) -> Result<&str, PaletteError> {
        self.symbols
            .get(index)
            .map(String::as_str)
            .ok_or(PaletteError::UnknownGlyph {
                index,
                len: self.symbols.len(),
            })
    }

    /// Add a custom glyph. Surrounding whitespace is trimmed; empty text is
    /// rejected. Registering an existing glyph returns it without
    /// duplicating the entry.
    pub fn register(&mut self, text: &str) -> Result<&str, PaletteError> {
        let symbol = text.trim();
        if symbol.is_empty() {
            return Err(PaletteError::EmptySymbol);
        }
        let index = match self.symbols.iter().position(|s| s == symbol) {
            Some(index) => index,
            None => {
                log::debug!("Registered glyph {:?}", symbol);
                self.symbols.push(symbol.to_string());
                self.symbols.len() - 1
            }
        };
        Ok(&self.symbols[index])
    }
}

impl Default for GlyphPalette {
    fn default() -> Self {
        Self::new(&SketchpadConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_palette() {
        let palette = GlyphPalette::default();
        assert_eq!(palette.symbols(), &["😀", "⭐", "🎉"]);
    }

    #[test]
    fn test_register_trims() {
        let mut palette = GlyphPalette::default();
        assert_eq!(palette.register("  🐱 ").unwrap(), "🐱");
        assert_eq!(palette.len(), 4);
        assert_eq!(palette.get(3).unwrap(), "🐱");
    }

    #[test]
    fn test_register_rejects_blank() {
        let mut palette = GlyphPalette::default();
        assert_eq!(palette.register(""), Err(PaletteError::EmptySymbol));
        assert_eq!(palette.register(" \t\n"), Err(PaletteError::EmptySymbol));
        assert_eq!(palette.len(), 3);
    }

    #[test]
    fn test_register_existing_is_not_duplicated() {
        let mut palette = GlyphPalette::default();
        assert_eq!(palette.register("⭐").unwrap(), "⭐");
        assert_eq!(palette.len(), 3);
    }

    #[test]
    fn test_multi_codepoint_glyph_is_one_entry() {
        let mut palette = GlyphPalette::default();
        palette.register("👩‍🚀").unwrap();
        assert_eq!(palette.get(3).unwrap(), "👩‍🚀");
    }

    #[test]
    fn test_unknown_index() {
        let palette = GlyphPalette::default();
        assert_eq!(palette.get(7), Err(PaletteError::UnknownGlyph { index: 7, len: 3 }));
    }

    #[test]
    fn test_blank_config_glyphs_skipped() {
        let mut config = SketchpadConfig::default();
        config.glyphs = vec!["🌙".into(), "   ".into()];
        let palette = GlyphPalette::new(&config);
        assert_eq!(palette.symbols(), &["🌙"]);
    }
}
