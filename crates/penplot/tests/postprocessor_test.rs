use kurbo::Point;
use penplot::*;

#[test]
fn test_postprocessor_empty_stream() {
    // No glyph motion: header and footer only.
    let program = post_process(&[], &MachineProfile::plotter());

    assert_eq!(program.lines.len(), 8);
    assert_eq!(program.lines[0], "G21", "Should select millimeters");
    assert_eq!(program.lines[1], "G90", "Should select absolute positioning");
    assert_eq!(program.lines[2], "F20000", "Should set the feed rate");
    assert_eq!(program.lines[3], "G1G90 Z1.0F20000");
    assert_eq!(program.lines[4], "G1G90 Z1.0F20000", "Safe lift is issued twice");
    assert!(program.body().is_empty());
    assert_eq!(
        &program.lines[5..],
        &["G1G90 Z1.0F20000", "G90 G0 X0 Y0", "M30"]
    );
}

#[test]
fn test_postprocessor_preserves_order() {
    let commands = vec![
        MotionCommand::Travel(Point::new(2.0, 3.0)),
        MotionCommand::Lower,
        MotionCommand::Draw(Point::new(2.5, 3.0)),
        MotionCommand::Draw(Point::new(2.5, 2.0)),
        MotionCommand::Lift,
        MotionCommand::Travel(Point::new(10.0, 3.0)),
        MotionCommand::Lower,
        MotionCommand::Draw(Point::new(10.0, 1.25)),
        MotionCommand::Lift,
    ];

    let program = post_process(&commands, &MachineProfile::plotter());

    assert_eq!(
        program.body(),
        &[
            "G0 X2.000Y3.000F20000",
            "G1G90 Z-6.0F20000",
            "G1 X2.500Y3.000F20000",
            "G1 X2.500Y2.000F20000",
            "G1G90 Z1.0F20000",
            "G0 X10.000Y3.000F20000",
            "G1G90 Z-6.0F20000",
            "G1 X10.000Y1.250F20000",
            "G1G90 Z1.0F20000",
        ]
    );
}

#[test]
fn test_postprocessor_rounds_to_three_decimals() {
    let program = post_process(
        &[
            MotionCommand::Lower,
            MotionCommand::Draw(Point::new(1.23456, -7.89012)),
        ],
        &MachineProfile::plotter(),
    );
    assert_eq!(program.body()[1], "G1 X1.235Y-7.890F20000");
}

#[test]
fn test_postprocessor_custom_machine() {
    let machine = MachineProfile {
        name: "bench".into(),
        lift_z: 3.0,
        draw_z: -0.5,
        feed_rate: 1500.0,
        ..MachineProfile::plotter()
    };
    let program = post_process(&[MotionCommand::Lower, MotionCommand::Lift], &machine);

    assert_eq!(program.lines[2], "F1500");
    assert_eq!(program.body(), &["G1G90 Z-0.5F1500", "G1G90 Z3.0F1500"]);
}

#[test]
fn test_postprocessor_fine_z_heights() {
    let machine = MachineProfile {
        lift_z: 0.25,
        draw_z: -0.35,
        ..MachineProfile::plotter()
    };
    let program = post_process(&[MotionCommand::Lower, MotionCommand::Lift], &machine);

    assert_eq!(program.lines[3], "G1G90 Z0.25F20000");
    assert_eq!(program.body(), &["G1G90 Z-0.35F20000", "G1G90 Z0.25F20000"]);
}
