//! Error types for the text-to-toolpath compiler.
//!
//! Every failure is attributed to the pipeline stage that raised it so callers
//! can report it without inspecting the variant.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Pipeline stage a [`CompileError`] originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    RequestValidation,
    FontLoad,
    Geometry,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::RequestValidation => "request validation",
            Stage::FontLoad => "font load",
            Stage::Geometry => "geometry",
        };
        f.write_str(name)
    }
}

/// Underlying cause of a font load failure.
#[derive(Error, Debug)]
pub enum FontLoadErrorKind {
    /// The font resource could not be read
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// The bytes are not a usable TrueType/OpenType font
    #[error("corrupt font data: {0}")]
    Parse(String),

    /// Loading did not finish in time
    #[error("timed out after {}ms", .0.as_millis())]
    Timeout(Duration),

    /// The font reports unusable metrics (e.g. zero units per em)
    #[error("invalid font metrics: {0}")]
    InvalidMetrics(String),
}

/// A font could not be loaded from the given locator.
#[derive(Error, Debug)]
#[error("failed to load font {locator}: {kind}")]
pub struct FontLoadError {
    /// The locator as requested by the caller.
    pub locator: String,
    #[source]
    pub kind: FontLoadErrorKind,
}

impl FontLoadError {
    pub fn new(locator: impl Into<String>, kind: impl Into<FontLoadErrorKind>) -> Self {
        Self {
            locator: locator.into(),
            kind: kind.into(),
        }
    }
}

/// Errors surfaced by a compilation request.
#[derive(Error, Debug)]
pub enum CompileError {
    /// Missing text, missing style or a style without a font reference
    #[error("request validation: {0}")]
    InvalidRequest(String),

    /// The outline provider failed to load the font
    #[error("font load: {0}")]
    FontLoad(#[from] FontLoadError),

    /// Outline data that cannot be turned into motion
    #[error("geometry: glyph {ch:?}: {message}")]
    Geometry { ch: char, message: String },
}

impl CompileError {
    pub fn invalid_request(message: impl Into<String>) -> Self {
        CompileError::InvalidRequest(message.into())
    }

    pub fn geometry(ch: char, message: impl Into<String>) -> Self {
        CompileError::Geometry {
            ch,
            message: message.into(),
        }
    }

    pub fn stage(&self) -> Stage {
        match self {
            CompileError::InvalidRequest(_) => Stage::RequestValidation,
            CompileError::FontLoad(_) => Stage::FontLoad,
            CompileError::Geometry { .. } => Stage::Geometry,
        }
    }
}
