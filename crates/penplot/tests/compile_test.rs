use penplot::*;

fn straight_font() -> MemoryFont {
    MemoryFont::new(1000)
        .with_glyph(
            'I',
            GlyphOutline::new(
                600.0,
                vec![
                    PathSegment::MoveTo { x: 0.0, y: 0.0 },
                    PathSegment::LineTo { x: 0.0, y: 700.0 },
                ],
            ),
        )
        .with_glyph(' ', GlyphOutline::empty(250.0))
        .with_missing_advance(500.0)
}

fn style() -> StyleProfile {
    StyleProfile {
        font_size: 10.0,
        margin_x: 1.0,
        margin_y: 1.0,
        line_height: Some(12.0),
        letter_spacing: 0.0,
        ..StyleProfile::default().with_font("Synthetic")
    }
}

fn provider() -> MemoryFontProvider {
    MemoryFontProvider::new().with_font(FontLocator::Named("Synthetic".into()), straight_font())
}

async fn compile_text(text: &str) -> MotionProgram {
    compile(
        &CompileRequest::new(text, style()),
        &provider(),
        &MachineProfile::plotter(),
    )
    .await
    .expect("compilation should succeed")
}

#[tokio::test]
async fn test_single_straight_glyph() {
    let program = compile_text("I").await;

    assert_eq!(
        program.lines,
        vec![
            "G21",
            "G90",
            "F20000",
            "G1G90 Z1.0F20000",
            "G1G90 Z1.0F20000",
            "G0 X1.000Y1.000F20000",
            "G1G90 Z-6.0F20000",
            "G1 X1.000Y-6.000F20000",
            "G1G90 Z1.0F20000",
            "G1G90 Z1.0F20000",
            "G90 G0 X0 Y0",
            "M30",
        ]
    );
    assert_eq!(program.header_len, 5);
    assert_eq!(program.footer_len, 3);
}

#[tokio::test]
async fn test_two_line_text() {
    let program = compile_text("I\nI").await;
    let travels: Vec<&String> = program
        .body()
        .iter()
        .filter(|l| l.starts_with("G0 "))
        .collect();
    assert_eq!(
        travels,
        vec!["G0 X1.000Y1.000F20000", "G0 X1.000Y13.000F20000"]
    );
}

#[tokio::test]
async fn test_blank_line_does_not_consume_a_slot() {
    let spaced = compile_text("I\n\n   \nI").await;
    let packed = compile_text("I\nI").await;
    assert_eq!(spaced, packed);
}

#[tokio::test]
async fn test_missing_glyph_advances_without_motion() {
    let program = compile_text("?I").await;
    // '?' is unmapped: 500 units * 0.01 of advance, no commands.
    assert_eq!(
        program.body(),
        &[
            "G0 X6.000Y1.000F20000".to_string(),
            "G1G90 Z-6.0F20000".to_string(),
            "G1 X6.000Y-6.000F20000".to_string(),
            "G1G90 Z1.0F20000".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_space_advances_without_motion() {
    let program = compile_text("I I").await;
    let travels: Vec<&String> = program
        .body()
        .iter()
        .filter(|l| l.starts_with("G0 "))
        .collect();
    // 600 + 250 units at 0.01 scale.
    assert_eq!(travels[1], "G0 X9.500Y1.000F20000");
}

#[tokio::test]
async fn test_deterministic_output() {
    let text = "I ?I\nII";
    let first = compile_text(text).await.to_text();
    let second = compile_text(text).await.to_text();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_text_output_is_newline_terminated() {
    let text = compile_text("I").await.to_text();
    assert!(text.starts_with("G21\nG90\nF20000\n"));
    assert!(text.ends_with("G90 G0 X0 Y0\nM30\n"));
}

#[test]
fn test_curves_use_machine_fidelity() {
    let font = MemoryFont::new(1000).with_glyph(
        'n',
        GlyphOutline::new(
            500.0,
            vec![
                PathSegment::MoveTo { x: 0.0, y: 0.0 },
                PathSegment::QuadTo {
                    cx: 250.0,
                    cy: 1000.0,
                    x: 500.0,
                    y: 0.0,
                },
            ],
        ),
    );

    let draws = |machine: &MachineProfile| {
        compile_with_font("n", &style(), machine, &font)
            .unwrap()
            .body()
            .iter()
            .filter(|l| l.starts_with("G1 X"))
            .count()
    };

    assert_eq!(draws(&MachineProfile::plotter()), 20);
    assert_eq!(draws(&MachineProfile::preview()), 2);
}

#[tokio::test]
async fn test_cached_provider_compiles_repeatedly() {
    let cached = CachedFontProvider::new(provider());
    let request = CompileRequest::new("I", style());
    let machine = MachineProfile::plotter();

    let first = compile(&request, &cached, &machine).await.unwrap();
    let second = compile(&request, &cached, &machine).await.unwrap();
    assert_eq!(first, second);
    assert_eq!(cached.cached_count().await, 1);
}

#[tokio::test]
async fn test_response_body() {
    let program = compile_text("I").await;
    let body = serde_json::to_value(CompileResponse::from(&program)).unwrap();
    assert_eq!(body["gcode"].as_str().unwrap(), program.to_text());
}
