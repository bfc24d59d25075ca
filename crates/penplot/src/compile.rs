use crate::error::{CompileError, Stage};
use crate::font::{FontProvider, GlyphSource};
use crate::layout::layout;
use crate::machine::MachineProfile;
use crate::postprocessor::post_process;
use crate::sequencer::ToolpathSequencer;
use crate::style::StyleProfile;
use crate::types::MotionProgram;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// A compilation request as received from the transport layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompileRequest {
    pub text: String,
    #[serde(alias = "profile")]
    pub style: Option<StyleProfile>,
}

impl CompileRequest {
    pub fn new(text: impl Into<String>, style: StyleProfile) -> Self {
        Self {
            text: text.into(),
            style: Some(style),
        }
    }

    /// Check the request and return its style.
    pub fn validate(&self) -> Result<&StyleProfile, CompileError> {
        if !self.text.split('\n').any(|line| !line.trim().is_empty()) {
            return Err(CompileError::invalid_request("text is empty"));
        }
        let style = self
            .style
            .as_ref()
            .ok_or_else(|| CompileError::invalid_request("style is missing"))?;
        style.validate()?;
        Ok(style)
    }
}

/// Successful response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompileResponse {
    pub gcode: String,
}

impl From<&MotionProgram> for CompileResponse {
    fn from(program: &MotionProgram) -> Self {
        Self {
            gcode: program.to_text(),
        }
    }
}

/// Failure response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub stage: Stage,
    pub error: String,
}

impl From<&CompileError> for ErrorResponse {
    fn from(err: &CompileError) -> Self {
        Self {
            stage: err.stage(),
            error: err.to_string(),
        }
    }
}

/// Validate the request, load its font and compile it.
///
/// Font loading is the only suspension point; nothing is laid out until the
/// font is available, and no partial program is ever returned.
pub async fn compile<P: FontProvider>(
    request: &CompileRequest,
    provider: &P,
    machine: &MachineProfile,
) -> Result<MotionProgram, CompileError> {
    let style = request.validate()?;
    machine.validate()?;
    let locator = style.font_locator()?;

    let font = provider.load(&locator).await?;
    compile_with_font(&request.text, style, machine, &font)
}

/// Compile `text` with an already loaded font.
pub fn compile_with_font<F: GlyphSource + ?Sized>(
    text: &str,
    style: &StyleProfile,
    machine: &MachineProfile,
    font: &F,
) -> Result<MotionProgram, CompileError> {
    let text_layout = layout(text, style, font, machine.advance_factor);
    let mut sequencer = ToolpathSequencer::for_machine(machine);
    let mut missing = 0usize;

    for placed in &text_layout.glyphs {
        let Some(outline) = font.glyph(placed.ch) else {
            debug!(ch = ?placed.ch, "no glyph mapping, skipping");
            missing += 1;
            continue;
        };
        let emitted = sequencer.sequence_glyph(placed, &outline)?;
        debug!(
            ch = ?placed.ch,
            x = placed.origin.x,
            y = placed.origin.y,
            commands = emitted,
            "sequenced glyph"
        );
    }

    let program = post_process(&sequencer.finish(), machine);
    info!(
        machine = %machine.name,
        lines = text_layout.line_count,
        glyphs = text_layout.glyphs.len(),
        missing,
        instructions = program.lines.len(),
        "compiled motion program"
    );
    Ok(program)
}
