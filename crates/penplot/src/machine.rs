use crate::error::CompileError;
use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;

/// Everything device-specific about a compilation.
///
/// The plotter and preview paths differ only in these values, so both are
/// expressed as named profiles of the same sequencer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MachineProfile {
    pub name: String,
    /// Z height with the pen raised.
    pub lift_z: f64,
    /// Z height with the pen on the paper.
    pub draw_z: f64,
    /// Feed rate token attached to every motion.
    pub feed_rate: f64,
    /// Line segments per flattened curve.
    pub curve_steps: NonZeroU32,
    /// Multiplier applied to every glyph advance.
    pub advance_factor: f64,
    /// Draw back to the contour start on `ClosePath`.
    #[serde(default)]
    pub close_contours: bool,
}

impl Default for MachineProfile {
    fn default() -> Self {
        Self::plotter()
    }
}

const PLOTTER_CURVE_STEPS: NonZeroU32 = match NonZeroU32::new(20) {
    Some(steps) => steps,
    None => unreachable!(),
};

const PREVIEW_CURVE_STEPS: NonZeroU32 = match NonZeroU32::new(2) {
    Some(steps) => steps,
    None => unreachable!(),
};

impl MachineProfile {
    /// High fidelity output for the physical plotter.
    pub fn plotter() -> Self {
        Self {
            name: "plotter".to_string(),
            lift_z: 1.0,
            draw_z: -6.0,
            feed_rate: 20000.0,
            curve_steps: PLOTTER_CURVE_STEPS,
            advance_factor: 1.0,
            close_contours: false,
        }
    }

    /// Low density output with tightened glyph spacing.
    pub fn preview() -> Self {
        Self {
            name: "preview".to_string(),
            lift_z: 0.5,
            draw_z: -5.0,
            feed_rate: 20000.0,
            curve_steps: PREVIEW_CURVE_STEPS,
            advance_factor: 0.3,
            close_contours: false,
        }
    }

    /// Look up one of the built-in profiles by name.
    pub fn builtin(name: &str) -> Option<Self> {
        match name {
            "plotter" => Some(Self::plotter()),
            "preview" => Some(Self::preview()),
            _ => None,
        }
    }

    pub fn validate(&self) -> Result<(), CompileError> {
        for (field, value) in [("liftZ", self.lift_z), ("drawZ", self.draw_z)] {
            if !value.is_finite() {
                return Err(CompileError::invalid_request(format!(
                    "machine profile {}: {field} must be finite",
                    self.name
                )));
            }
        }
        if !self.feed_rate.is_finite() || self.feed_rate <= 0.0 {
            return Err(CompileError::invalid_request(format!(
                "machine profile {}: feed rate must be positive",
                self.name
            )));
        }
        if !self.advance_factor.is_finite() || self.advance_factor <= 0.0 {
            return Err(CompileError::invalid_request(format!(
                "machine profile {}: advance factor must be positive",
                self.name
            )));
        }
        Ok(())
    }
}
