use crate::types::{PathSegment, PlacedGlyph};
use kurbo::{Affine, Point};

pub mod curve;

pub use curve::{flatten, flatten_cubic, flatten_quad};

/// Format a coordinate the way it appears in the motion program.
///
/// Adding 0.0 folds -0.0 into 0.0 so an exact zero never prints as "-0.000".
pub fn format_coordinate(value: f64) -> String {
    format!("{:.3}", value + 0.0)
}

/// Whether two output points land on the same emitted coordinate pair.
///
/// Positions are compared at the resolution the emitter writes them with, so
/// two points that would print identically never produce separate moves.
pub fn coincident(a: Point, b: Point) -> bool {
    (a.x == b.x && a.y == b.y)
        || (format_coordinate(a.x) == format_coordinate(b.x)
            && format_coordinate(a.y) == format_coordinate(b.y))
}

/// A segment after the font-unit to output-unit transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputSegment {
    MoveTo(Point),
    LineTo(Point),
    QuadTo(Point, Point),
    CubicTo(Point, Point, Point),
    ClosePath,
}

/// Maps glyph coordinates (font units, Y up) into output space (Y down).
///
/// `output = origin + (x * scale, -y * scale)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphTransform {
    affine: Affine,
}

impl GlyphTransform {
    pub fn new(origin: Point, scale: f64) -> Self {
        Self {
            affine: Affine::new([scale, 0.0, 0.0, -scale, origin.x, origin.y]),
        }
    }

    pub fn for_glyph(placed: &PlacedGlyph) -> Self {
        Self::new(placed.origin, placed.scale)
    }

    pub fn apply(&self, x: f64, y: f64) -> Point {
        self.affine * Point::new(x, y)
    }

    pub fn segment(&self, segment: &PathSegment) -> OutputSegment {
        match *segment {
            PathSegment::MoveTo { x, y } => OutputSegment::MoveTo(self.apply(x, y)),
            PathSegment::LineTo { x, y } => OutputSegment::LineTo(self.apply(x, y)),
            PathSegment::QuadTo { cx, cy, x, y } => {
                OutputSegment::QuadTo(self.apply(cx, cy), self.apply(x, y))
            }
            PathSegment::CubicTo {
                c1x,
                c1y,
                c2x,
                c2y,
                x,
                y,
            } => OutputSegment::CubicTo(
                self.apply(c1x, c1y),
                self.apply(c2x, c2y),
                self.apply(x, y),
            ),
            PathSegment::ClosePath => OutputSegment::ClosePath,
        }
    }
}
