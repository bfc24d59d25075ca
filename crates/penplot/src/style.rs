use crate::error::CompileError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Where the outline provider should fetch a font from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FontLocator {
    /// A font registered by name, e.g. `Quicksand`.
    Named(String),
    /// An explicit font file.
    Path(PathBuf),
}

impl fmt::Display for FontLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FontLocator::Named(name) => write!(f, "{name}"),
            FontLocator::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Text styling for one compilation. Lengths are in output units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StyleProfile {
    /// Registered font name.
    pub font: Option<String>,
    /// Explicit font file; takes precedence over `font`.
    pub font_path: Option<PathBuf>,
    pub font_size: f64,
    pub margin_x: f64,
    pub margin_y: f64,
    /// Line pitch as a multiple of the font size.
    pub line_height_multiplier: f64,
    /// Absolute line pitch, overrides the multiplier.
    pub line_height: Option<f64>,
    /// Extra horizontal gap added after every character.
    pub letter_spacing: f64,
}

impl Default for StyleProfile {
    fn default() -> Self {
        Self {
            font: Some("Quicksand".to_string()),
            font_path: None,
            font_size: 8.0,
            margin_x: 1.665,
            margin_y: 7.136,
            line_height_multiplier: 1.2,
            line_height: None,
            letter_spacing: 0.1,
        }
    }
}

impl StyleProfile {
    /// Small, tightly set text used for card previews.
    pub fn compact() -> Self {
        Self {
            font_size: 4.0,
            margin_x: -2.351,
            margin_y: -3.679,
            line_height: Some(4.3),
            letter_spacing: 0.0,
            ..Self::default()
        }
    }

    /// Same style, drawn with the named font.
    pub fn with_font(mut self, name: impl Into<String>) -> Self {
        self.font = Some(name.into());
        self.font_path = None;
        self
    }

    /// Same style, drawn with the font file at `path`.
    pub fn with_font_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.font_path = Some(path.into());
        self
    }

    /// Resolve the font reference, preferring an explicit path.
    pub fn font_locator(&self) -> Result<FontLocator, CompileError> {
        if let Some(path) = self.font_path.as_ref().filter(|p| !p.as_os_str().is_empty()) {
            return Ok(FontLocator::Path(path.clone()));
        }
        match self.font.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => Ok(FontLocator::Named(name.to_string())),
            _ => Err(CompileError::invalid_request(
                "style must name a font or a font path",
            )),
        }
    }

    /// Vertical distance between consecutive retained lines.
    pub fn line_height(&self) -> f64 {
        self.line_height
            .unwrap_or(self.font_size * self.line_height_multiplier)
    }

    pub fn validate(&self) -> Result<(), CompileError> {
        self.font_locator()?;
        if !self.font_size.is_finite() || self.font_size <= 0.0 {
            return Err(CompileError::invalid_request(format!(
                "font size must be positive, got {}",
                self.font_size
            )));
        }
        let lengths = [
            ("marginX", self.margin_x),
            ("marginY", self.margin_y),
            ("letterSpacing", self.letter_spacing),
            ("lineHeight", self.line_height()),
        ];
        for (name, value) in lengths {
            if !value.is_finite() {
                return Err(CompileError::invalid_request(format!(
                    "{name} must be finite, got {value}"
                )));
            }
        }
        Ok(())
    }
}
