use super::GlyphSource;
use crate::error::{FontLoadError, FontLoadErrorKind};
use crate::types::{FontMetrics, GlyphOutline, PathSegment};
use std::fmt;
use std::sync::Arc;
use ttf_parser::{Face, GlyphId};

/// A TrueType/OpenType font backed by owned bytes.
///
/// The `Face` is re-created for each query; parsing only validates headers and
/// builds the table directory.
#[derive(Clone)]
pub struct TtfFont {
    bytes: Arc<[u8]>,
    metrics: FontMetrics,
}

impl TtfFont {
    /// Parse font data. `locator` is only used for error reporting.
    pub fn from_bytes(locator: &str, bytes: impl Into<Arc<[u8]>>) -> Result<Self, FontLoadError> {
        let bytes = bytes.into();
        let face = Face::parse(&bytes, 0)
            .map_err(|err| FontLoadError::new(locator, FontLoadErrorKind::Parse(err.to_string())))?;

        let units_per_em = face.units_per_em();
        if units_per_em == 0 {
            return Err(FontLoadError::new(
                locator,
                FontLoadErrorKind::InvalidMetrics("units per em is zero".to_string()),
            ));
        }

        Ok(Self {
            metrics: FontMetrics::new(units_per_em),
            bytes,
        })
    }

    fn face(&self) -> Option<Face<'_>> {
        Face::parse(&self.bytes, 0).ok()
    }
}

impl GlyphSource for TtfFont {
    fn metrics(&self) -> FontMetrics {
        self.metrics
    }

    fn advance_width(&self, ch: char) -> f64 {
        let Some(face) = self.face() else {
            return 0.0;
        };
        // Unmapped characters fall back to .notdef.
        let id = face.glyph_index(ch).unwrap_or(GlyphId(0));
        face.glyph_hor_advance(id).map(f64::from).unwrap_or(0.0)
    }

    fn glyph(&self, ch: char) -> Option<GlyphOutline> {
        let face = self.face()?;
        let id = face.glyph_index(ch)?;
        let advance = face.glyph_hor_advance(id).map(f64::from).unwrap_or(0.0);

        let mut collector = SegmentCollector::default();
        if face.outline_glyph(id, &mut collector).is_none() {
            return Some(GlyphOutline::empty(advance));
        }
        Some(GlyphOutline::new(advance, collector.segments))
    }
}

impl fmt::Debug for TtfFont {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TtfFont")
            .field("units_per_em", &self.metrics.units_per_em)
            .field("bytes_len", &self.bytes.len())
            .finish()
    }
}

#[derive(Default)]
struct SegmentCollector {
    segments: Vec<PathSegment>,
}

impl ttf_parser::OutlineBuilder for SegmentCollector {
    fn move_to(&mut self, x: f32, y: f32) {
        self.segments.push(PathSegment::MoveTo {
            x: f64::from(x),
            y: f64::from(y),
        });
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.segments.push(PathSegment::LineTo {
            x: f64::from(x),
            y: f64::from(y),
        });
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        self.segments.push(PathSegment::QuadTo {
            cx: f64::from(x1),
            cy: f64::from(y1),
            x: f64::from(x),
            y: f64::from(y),
        });
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        self.segments.push(PathSegment::CubicTo {
            c1x: f64::from(x1),
            c1y: f64::from(y1),
            c2x: f64::from(x2),
            c2y: f64::from(y2),
            x: f64::from(x),
            y: f64::from(y),
        });
    }

    fn close(&mut self) {
        self.segments.push(PathSegment::ClosePath);
    }
}
