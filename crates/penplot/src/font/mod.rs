//! Outline providers.
//!
//! A [`FontProvider`] turns a [`FontLocator`] into a loaded font; the loaded
//! font is a [`GlyphSource`] answering per-character questions synchronously.
//! Loading is the only asynchronous step of a compilation.

use crate::error::FontLoadError;
use crate::style::FontLocator;
use crate::types::{FontMetrics, GlyphOutline};
use std::future::Future;

mod cache;
mod file;
mod memory;
mod ttf;

pub use cache::CachedFontProvider;
pub use file::{FileFontProvider, DEFAULT_LOAD_TIMEOUT};
pub use memory::{MemoryFont, MemoryFontProvider};
pub use ttf::TtfFont;

/// A loaded font instance.
pub trait GlyphSource {
    fn metrics(&self) -> FontMetrics;

    /// Horizontal advance of `ch` in font units.
    ///
    /// Characters the font does not map still report the advance of the
    /// fallback glyph so layout can keep its cursor moving.
    fn advance_width(&self, ch: char) -> f64;

    /// Outline of `ch`, or `None` if the font has no mapping for it.
    fn glyph(&self, ch: char) -> Option<GlyphOutline>;
}

impl<T: GlyphSource + ?Sized> GlyphSource for &T {
    fn metrics(&self) -> FontMetrics {
        (**self).metrics()
    }

    fn advance_width(&self, ch: char) -> f64 {
        (**self).advance_width(ch)
    }

    fn glyph(&self, ch: char) -> Option<GlyphOutline> {
        (**self).glyph(ch)
    }
}

/// Loads fonts by locator.
pub trait FontProvider {
    type Font: GlyphSource + Send + Sync;

    fn load(
        &self,
        locator: &FontLocator,
    ) -> impl Future<Output = Result<Self::Font, FontLoadError>> + Send;
}
