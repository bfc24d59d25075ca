use penplot::*;
use std::path::PathBuf;

// glyphs.ttf: 1000 units per em, .notdef (600), 'A' (540), an empty space
// (250) and an 'o' (500) built from four quadratic arcs.
fn fixture_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

fn fixture_font() -> TtfFont {
    let bytes = std::fs::read(fixture_dir().join("glyphs.ttf")).unwrap();
    TtfFont::from_bytes("glyphs.ttf", bytes).unwrap()
}

fn style() -> StyleProfile {
    StyleProfile {
        font_size: 8.0,
        margin_x: 2.0,
        margin_y: 10.0,
        letter_spacing: 0.0,
        ..StyleProfile::default().with_font("glyphs")
    }
}

fn count(program: &MotionProgram, prefix: &str) -> usize {
    program
        .body()
        .iter()
        .filter(|line| line.starts_with(prefix))
        .count()
}

#[test]
fn test_ttf_metrics_and_advances() {
    let font = fixture_font();
    assert_eq!(font.metrics().units_per_em, 1000);
    assert_eq!(font.advance_width('A'), 540.0);
    assert_eq!(font.advance_width('o'), 500.0);
    assert_eq!(font.advance_width(' '), 250.0);
    // Unmapped characters advance by .notdef.
    assert_eq!(font.advance_width('Z'), 600.0);
    assert!(font.glyph('Z').is_none());
}

#[test]
fn test_ttf_space_is_empty_outline() {
    let space = fixture_font().glyph(' ').unwrap();
    assert!(space.is_empty());
    assert_eq!(space.advance_width, 250.0);
}

#[test]
fn test_ttf_line_outline() {
    let outline = fixture_font().glyph('A').unwrap();
    let line = |x: f64, y: f64| PathSegment::LineTo { x, y };

    assert_eq!(outline.advance_width, 540.0);
    assert_eq!(
        outline.segments,
        vec![
            PathSegment::MoveTo { x: 173.0, y: 267.0 },
            line(369.0, 267.0),
            line(270.0, 587.0),
            line(173.0, 267.0),
            PathSegment::ClosePath,
            PathSegment::MoveTo { x: 6.0, y: 0.0 },
            line(224.0, 656.0),
            line(320.0, 656.0),
            line(541.0, 0.0),
            line(452.0, 0.0),
            line(390.0, 200.0),
            line(151.0, 200.0),
            line(85.0, 0.0),
            line(6.0, 0.0),
            PathSegment::ClosePath,
        ]
    );
}

#[test]
fn test_ttf_quadratic_outline() {
    let outline = fixture_font().glyph('o').unwrap();
    let quad = |cx: f64, cy: f64, x: f64, y: f64| PathSegment::QuadTo { cx, cy, x, y };

    assert_eq!(
        outline.segments,
        vec![
            PathSegment::MoveTo { x: 250.0, y: 0.0 },
            quad(500.0, 0.0, 500.0, 250.0),
            quad(500.0, 500.0, 250.0, 500.0),
            quad(0.0, 500.0, 0.0, 250.0),
            quad(0.0, 0.0, 250.0, 0.0),
            PathSegment::ClosePath,
        ]
    );
}

#[test]
fn test_ttf_compiles_text() {
    let font = fixture_font();
    let program =
        compile_with_font("Ao Z\n\n  o", &style(), &MachineProfile::plotter(), &font).unwrap();

    // Three glyphs with outlines, one sub-contour each for 'o' and two for 'A'.
    assert_eq!(count(&program, "G0 "), 4);
    assert_eq!(count(&program, "G1G90 Z-6.0"), 4);
    // 'A' draws 3 + 8 lines, each 'o' 4 arcs of 20 samples.
    assert_eq!(count(&program, "G1 X"), 11 + 2 * 80);

    let mut down = false;
    for line in program.body() {
        match line.as_str() {
            "G1G90 Z1.0F20000" => down = false,
            "G1G90 Z-6.0F20000" => down = true,
            l if l.starts_with("G0 ") => assert!(!down, "travel with pen down: {l}"),
            l => assert!(down, "draw with pen up: {l}"),
        }
    }
    assert!(!down);
}

#[test]
fn test_ttf_places_glyph_in_output_space() {
    let font = fixture_font();
    let program = compile_with_font("A", &style(), &MachineProfile::plotter(), &font).unwrap();

    // (173, 267) font units at scale 0.008 from origin (2, 10), Y inverted.
    assert_eq!(program.body()[0], "G0 X3.384Y7.864F20000");
}

#[tokio::test]
async fn test_file_provider_loads_fixture() {
    let provider = FileFontProvider::new(fixture_dir());
    let request = CompileRequest::new("oA", style());

    let program = compile(&request, &provider, &MachineProfile::preview())
        .await
        .unwrap();

    // Preview samples each arc twice.
    assert_eq!(count(&program, "G1 X"), 8 + 11);
    assert_eq!(count(&program, "G1G90 Z-5.0"), 3);
}

#[tokio::test]
async fn test_file_provider_by_stored_path() {
    let provider = FileFontProvider::new(fixture_dir());
    let font = provider
        .load(&FontLocator::Path("/fonts/glyphs.ttf".into()))
        .await
        .unwrap();
    assert_eq!(font.advance_width('A'), 540.0);
}
