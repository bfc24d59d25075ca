use super::{FontProvider, GlyphSource};
use crate::error::FontLoadError;
use crate::style::FontLocator;
use crate::types::{FontMetrics, GlyphOutline};
use std::collections::HashMap;
use std::io;
use std::sync::Arc;

#[derive(Debug, Clone)]
struct MemoryFontData {
    metrics: FontMetrics,
    glyphs: HashMap<char, GlyphOutline>,
    missing_advance: f64,
}

/// A font whose outlines are held in memory.
#[derive(Debug, Clone)]
pub struct MemoryFont {
    data: Arc<MemoryFontData>,
}

impl MemoryFont {
    pub fn new(units_per_em: u16) -> Self {
        Self {
            data: Arc::new(MemoryFontData {
                metrics: FontMetrics::new(units_per_em),
                glyphs: HashMap::new(),
                missing_advance: 0.0,
            }),
        }
    }

    /// Add or replace the outline for `ch`.
    pub fn with_glyph(mut self, ch: char, outline: GlyphOutline) -> Self {
        Arc::make_mut(&mut self.data).glyphs.insert(ch, outline);
        self
    }

    /// Advance reported for characters without a glyph.
    pub fn with_missing_advance(mut self, advance: f64) -> Self {
        Arc::make_mut(&mut self.data).missing_advance = advance;
        self
    }
}

impl GlyphSource for MemoryFont {
    fn metrics(&self) -> FontMetrics {
        self.data.metrics
    }

    fn advance_width(&self, ch: char) -> f64 {
        self.data
            .glyphs
            .get(&ch)
            .map(|g| g.advance_width)
            .unwrap_or(self.data.missing_advance)
    }

    fn glyph(&self, ch: char) -> Option<GlyphOutline> {
        self.data.glyphs.get(&ch).cloned()
    }
}

/// Serves a fixed set of in-memory fonts.
#[derive(Debug, Clone, Default)]
pub struct MemoryFontProvider {
    fonts: HashMap<FontLocator, MemoryFont>,
}

impl MemoryFontProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_font(mut self, locator: FontLocator, font: MemoryFont) -> Self {
        self.fonts.insert(locator, font);
        self
    }
}

impl FontProvider for MemoryFontProvider {
    type Font = MemoryFont;

    async fn load(&self, locator: &FontLocator) -> Result<MemoryFont, FontLoadError> {
        self.fonts.get(locator).cloned().ok_or_else(|| {
            FontLoadError::new(
                locator.to_string(),
                io::Error::new(io::ErrorKind::NotFound, "font not registered"),
            )
        })
    }
}
