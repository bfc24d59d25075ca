use crate::geometry::format_coordinate;
use crate::machine::MachineProfile;
use crate::types::{MotionCommand, MotionProgram};
use kurbo::Point;

/// Convert a motion command stream into plotter G-code.
///
/// The header selects metric units, absolute positioning and the feed rate,
/// then lifts the pen twice. The footer lifts the pen, returns to the machine
/// origin and ends the program. Commands are emitted in the order given.
pub fn post_process(commands: &[MotionCommand], machine: &MachineProfile) -> MotionProgram {
    let feed = format_feed(machine.feed_rate);
    let lift = format!("G1G90 Z{}F{feed}", format_z(machine.lift_z));
    let lower = format!("G1G90 Z{}F{feed}", format_z(machine.draw_z));

    let mut lines = vec![
        "G21".to_string(), // Millimeters
        "G90".to_string(), // Absolute positioning
        format!("F{feed}"),
        lift.clone(), // Safe height
        lift.clone(),
    ];
    let header_len = lines.len();

    for command in commands {
        let line = match command {
            MotionCommand::Travel(p) => format!("G0 {}F{feed}", format_xy(*p)),
            MotionCommand::Draw(p) => format!("G1 {}F{feed}", format_xy(*p)),
            MotionCommand::Lift => lift.clone(),
            MotionCommand::Lower => lower.clone(),
        };
        lines.push(line);
    }

    let footer = [lift, "G90 G0 X0 Y0".to_string(), "M30".to_string()];
    let footer_len = footer.len();
    lines.extend(footer);

    MotionProgram {
        lines,
        header_len,
        footer_len,
    }
}

fn format_xy(p: Point) -> String {
    format!("X{}Y{}", format_coordinate(p.x), format_coordinate(p.y))
}

/// One decimal when that is exact (`Z1.0`), otherwise the full value.
fn format_z(z: f64) -> String {
    let short = format!("{z:.1}");
    if short.parse::<f64>() == Ok(z) {
        short
    } else {
        format!("{z}")
    }
}

fn format_feed(feed: f64) -> String {
    if feed.fract() == 0.0 {
        format!("{feed:.0}")
    } else {
        format!("{feed}")
    }
}
