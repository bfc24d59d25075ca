use kurbo::Point;
use serde::{Deserialize, Serialize};

/// One element of a glyph outline, in font design units relative to the glyph origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PathSegment {
    /// Start a new contour.
    MoveTo { x: f64, y: f64 },
    /// Straight line to the given point.
    LineTo { x: f64, y: f64 },
    /// Quadratic Bézier with one control point (TrueType-style).
    QuadTo { cx: f64, cy: f64, x: f64, y: f64 },
    /// Cubic Bézier with two control points (CFF-style).
    CubicTo {
        c1x: f64,
        c1y: f64,
        c2x: f64,
        c2y: f64,
        x: f64,
        y: f64,
    },
    /// Close the current contour.
    ClosePath,
}

impl PathSegment {
    /// All coordinates carried by the segment, in declaration order.
    pub fn coordinates(&self) -> Vec<f64> {
        match *self {
            PathSegment::MoveTo { x, y } | PathSegment::LineTo { x, y } => vec![x, y],
            PathSegment::QuadTo { cx, cy, x, y } => vec![cx, cy, x, y],
            PathSegment::CubicTo {
                c1x,
                c1y,
                c2x,
                c2y,
                x,
                y,
            } => vec![c1x, c1y, c2x, c2y, x, y],
            PathSegment::ClosePath => Vec::new(),
        }
    }

    pub fn is_finite(&self) -> bool {
        self.coordinates().iter().all(|v| v.is_finite())
    }
}

/// The printable shape of one character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlyphOutline {
    /// Horizontal advance in font design units.
    pub advance_width: f64,
    pub segments: Vec<PathSegment>,
}

impl GlyphOutline {
    pub fn new(advance_width: f64, segments: Vec<PathSegment>) -> Self {
        Self {
            advance_width,
            segments,
        }
    }

    /// An outline with no contours, e.g. a space.
    pub fn empty(advance_width: f64) -> Self {
        Self::new(advance_width, Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Check the structural invariants of the outline.
    ///
    /// A non-empty outline must start with `MoveTo`, all coordinates must be
    /// finite and the advance width must be a finite, non-negative number.
    pub fn validate(&self) -> Result<(), String> {
        if !self.advance_width.is_finite() || self.advance_width < 0.0 {
            return Err(format!("invalid advance width {}", self.advance_width));
        }
        if let Some(first) = self.segments.first() {
            if !matches!(first, PathSegment::MoveTo { .. }) {
                return Err(format!("outline starts with {first:?} instead of MoveTo"));
            }
        }
        if let Some((index, segment)) = self
            .segments
            .iter()
            .enumerate()
            .find(|(_, segment)| !segment.is_finite())
        {
            return Err(format!(
                "segment {index} has non-finite coordinates: {segment:?}"
            ));
        }
        Ok(())
    }
}

/// Font-wide metrics of one loaded font instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontMetrics {
    pub units_per_em: u16,
}

impl FontMetrics {
    pub fn new(units_per_em: u16) -> Self {
        Self { units_per_em }
    }

    /// Font-unit to output-unit scale at the given font size.
    pub fn scale(&self, font_size: f64) -> f64 {
        font_size / f64::from(self.units_per_em)
    }
}

/// A character placed by the layout engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlacedGlyph {
    pub ch: char,
    /// Pen origin in output units.
    pub origin: Point,
    /// Font-unit to output-unit scale.
    pub scale: f64,
    /// Index of the retained (non-blank) line the character sits on.
    pub line: usize,
}

/// Tool state tracked by the sequencer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PenState {
    #[default]
    Up,
    Down,
}

/// A single machine-level instruction produced by the sequencer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MotionCommand {
    /// Pen-up move to an absolute XY position.
    Travel(Point),
    /// Pen-down move to an absolute XY position.
    Draw(Point),
    /// Raise the pen to the safe height.
    Lift,
    /// Lower the pen to drawing depth.
    Lower,
}

/// The final machine program, one instruction per line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MotionProgram {
    /// A list of G-code command strings.
    pub lines: Vec<String>,
    /// Number of leading preamble lines.
    pub header_len: usize,
    /// Number of trailing footer lines.
    pub footer_len: usize,
}

impl MotionProgram {
    /// The per-character motion between header and footer.
    pub fn body(&self) -> &[String] {
        let end = self.lines.len().saturating_sub(self.footer_len);
        let start = self.header_len.min(end);
        &self.lines[start..end]
    }

    /// Render the program as newline-terminated text.
    pub fn to_text(&self) -> String {
        let mut text = String::with_capacity(self.lines.iter().map(|l| l.len() + 1).sum());
        for line in &self.lines {
            text.push_str(line);
            text.push('\n');
        }
        text
    }
}
