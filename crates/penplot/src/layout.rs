use crate::font::GlyphSource;
use crate::style::StyleProfile;
use crate::types::PlacedGlyph;
use kurbo::Point;

/// Result of laying out a text block.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLayout {
    pub glyphs: Vec<PlacedGlyph>,
    /// Number of retained (non-blank) lines.
    pub line_count: usize,
}

/// Place every character of `text` in reading order.
///
/// Blank lines are dropped before numbering, so they take no vertical space.
/// Retained lines are trimmed; line `i` sits at `margin_y + i * line_height`.
/// After each character the cursor advances by
/// `advance_width * scale * advance_factor + letter_spacing`, whether or not
/// the character has an outline.
pub fn layout<F: GlyphSource + ?Sized>(
    text: &str,
    style: &StyleProfile,
    font: &F,
    advance_factor: f64,
) -> TextLayout {
    let scale = font.metrics().scale(style.font_size);
    let line_height = style.line_height();
    let mut glyphs = Vec::new();
    let mut line_count = 0;

    let lines = text
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty());

    for (index, line) in lines.enumerate() {
        line_count += 1;
        let y = style.margin_y + index as f64 * line_height;
        let mut x = style.margin_x;

        for ch in line.chars() {
            glyphs.push(PlacedGlyph {
                ch,
                origin: Point::new(x, y),
                scale,
                line: index,
            });
            x += font.advance_width(ch) * scale * advance_factor + style.letter_spacing;
        }
    }

    TextLayout { glyphs, line_count }
}
