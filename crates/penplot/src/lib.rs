mod compile;
mod error;
pub mod font;
mod geometry;
mod layout;
mod machine;
mod postprocessor;
mod presets;
mod sequencer;
mod style;
mod template;
mod types;

pub use compile::{compile, compile_with_font, CompileRequest, CompileResponse, ErrorResponse};
pub use error::{CompileError, FontLoadError, FontLoadErrorKind, Stage};
pub use font::{
    CachedFontProvider, FileFontProvider, FontProvider, GlyphSource, MemoryFont,
    MemoryFontProvider, TtfFont,
};
pub use geometry::{
    coincident, flatten, flatten_cubic, flatten_quad, format_coordinate, GlyphTransform,
    OutputSegment,
};
pub use layout::{layout, TextLayout};
pub use machine::MachineProfile;
pub use postprocessor::post_process;
pub use presets::PresetLibrary;
pub use sequencer::ToolpathSequencer;
pub use style::{FontLocator, StyleProfile};
pub use template::{fill_template, parse_fields};
pub use types::*;

/// Install the stderr log subscriber used by the command line tool.
///
/// `RUST_LOG` overrides the default `info` level.
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::EnvFilter;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|err| anyhow::anyhow!("failed to install log subscriber: {err}"))
}
