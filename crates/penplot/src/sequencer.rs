use crate::error::CompileError;
use crate::geometry::{coincident, flatten, GlyphTransform, OutputSegment};
use crate::machine::MachineProfile;
use crate::types::{GlyphOutline, MotionCommand, PenState, PlacedGlyph};
use kurbo::Point;
use std::num::NonZeroU32;

/// Turns glyph outlines into pen-up/pen-down motion.
///
/// The sequencer tracks the physical pen position across glyphs, starting at
/// the machine origin. Every glyph is entered and left with the pen up. Moves
/// to the current position are never emitted, and a draw is always preceded
/// by a lower or another draw.
#[derive(Debug, Clone)]
pub struct ToolpathSequencer {
    steps: NonZeroU32,
    close_contours: bool,
    state: PenState,
    position: Point,
    commands: Vec<MotionCommand>,
}

impl ToolpathSequencer {
    pub fn new(steps: NonZeroU32, close_contours: bool) -> Self {
        Self {
            steps,
            close_contours,
            state: PenState::Up,
            position: Point::ORIGIN,
            commands: Vec::new(),
        }
    }

    pub fn for_machine(machine: &MachineProfile) -> Self {
        Self::new(machine.curve_steps, machine.close_contours)
    }

    pub fn state(&self) -> PenState {
        self.state
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn commands(&self) -> &[MotionCommand] {
        &self.commands
    }

    pub fn finish(self) -> Vec<MotionCommand> {
        self.commands
    }

    /// Append the motion for one placed glyph, returning the number of
    /// commands emitted.
    ///
    /// The outline is validated and transformed before anything is emitted,
    /// so a rejected glyph leaves the sequencer untouched.
    pub fn sequence_glyph(
        &mut self,
        placed: &PlacedGlyph,
        outline: &GlyphOutline,
    ) -> Result<usize, CompileError> {
        outline
            .validate()
            .map_err(|message| CompileError::geometry(placed.ch, message))?;

        let transform = GlyphTransform::for_glyph(placed);
        let segments: Vec<OutputSegment> = outline
            .segments
            .iter()
            .map(|segment| transform.segment(segment))
            .collect();
        if let Some(index) = segments.iter().position(|s| !output_is_finite(s)) {
            return Err(CompileError::geometry(
                placed.ch,
                format!("segment {index} overflows output space"),
            ));
        }

        let before = self.commands.len();
        let mut contour_start = None;
        let mut closed = false;

        for segment in &segments {
            match *segment {
                OutputSegment::MoveTo(p) => {
                    self.lift();
                    self.travel(p);
                    contour_start = Some(p);
                    closed = false;
                }
                OutputSegment::ClosePath => {
                    if let (true, Some(start)) = (self.close_contours, contour_start) {
                        if self.state == PenState::Down {
                            self.draw(start);
                        }
                    }
                    self.lift();
                    closed = true;
                }
                _ => {
                    // Drawing after a close without a new MoveTo resumes at
                    // the start of the closed contour.
                    if closed {
                        if let Some(start) = contour_start {
                            self.lift();
                            self.travel(start);
                        }
                        closed = false;
                    }
                    self.lower();
                    for p in flatten(segment, self.position, self.steps) {
                        self.draw(p);
                    }
                }
            }
        }

        self.lift();
        Ok(self.commands.len() - before)
    }

    fn lift(&mut self) {
        if self.state == PenState::Down {
            self.commands.push(MotionCommand::Lift);
            self.state = PenState::Up;
        }
    }

    fn lower(&mut self) {
        if self.state == PenState::Up {
            self.commands.push(MotionCommand::Lower);
            self.state = PenState::Down;
        }
    }

    fn travel(&mut self, p: Point) {
        debug_assert_eq!(self.state, PenState::Up);
        if !coincident(p, self.position) {
            self.commands.push(MotionCommand::Travel(p));
            self.position = p;
        }
    }

    fn draw(&mut self, p: Point) {
        debug_assert_eq!(self.state, PenState::Down);
        if !coincident(p, self.position) {
            self.commands.push(MotionCommand::Draw(p));
            self.position = p;
        }
    }
}

fn output_is_finite(segment: &OutputSegment) -> bool {
    let finite = |p: &Point| p.x.is_finite() && p.y.is_finite();
    match segment {
        OutputSegment::MoveTo(p) | OutputSegment::LineTo(p) => finite(p),
        OutputSegment::QuadTo(c, p) => finite(c) && finite(p),
        OutputSegment::CubicTo(c1, c2, p) => finite(c1) && finite(c2) && finite(p),
        OutputSegment::ClosePath => true,
    }
}
