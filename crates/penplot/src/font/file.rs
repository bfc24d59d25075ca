use super::{FontProvider, TtfFont};
use crate::error::{FontLoadError, FontLoadErrorKind};
use crate::style::FontLocator;
use std::future::Future;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

/// Default upper bound on a single font read.
pub const DEFAULT_LOAD_TIMEOUT: Duration = Duration::from_secs(10);

/// Loads `.ttf` files from a font directory.
///
/// `Named("Quicksand")` resolves to `<font_dir>/Quicksand.ttf`. Explicit paths
/// are used as given, except that relative paths and the `/fonts/` prefix used
/// by stored locators are resolved inside `font_dir`.
#[derive(Debug, Clone)]
pub struct FileFontProvider {
    font_dir: PathBuf,
    load_timeout: Duration,
}

impl FileFontProvider {
    pub fn new(font_dir: impl Into<PathBuf>) -> Self {
        Self {
            font_dir: font_dir.into(),
            load_timeout: DEFAULT_LOAD_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, load_timeout: Duration) -> Self {
        self.load_timeout = load_timeout;
        self
    }

    pub fn font_dir(&self) -> &Path {
        &self.font_dir
    }

    /// File system path a locator refers to.
    pub fn resolve(&self, locator: &FontLocator) -> PathBuf {
        match locator {
            FontLocator::Named(name) => self.font_dir.join(format!("{name}.ttf")),
            FontLocator::Path(path) => {
                if let Ok(rest) = path.strip_prefix("/fonts") {
                    self.font_dir.join(rest)
                } else if path.is_relative() {
                    self.font_dir.join(path)
                } else {
                    path.clone()
                }
            }
        }
    }

    /// Await `read` for at most the configured load timeout.
    async fn read_bounded<F>(&self, name: &str, read: F) -> Result<Vec<u8>, FontLoadError>
    where
        F: Future<Output = io::Result<Vec<u8>>>,
    {
        match tokio::time::timeout(self.load_timeout, read).await {
            Ok(Ok(bytes)) => Ok(bytes),
            Ok(Err(err)) => {
                warn!(locator = %name, error = %err, "font read failed");
                Err(FontLoadError::new(name, err))
            }
            Err(_) => {
                warn!(
                    locator = %name,
                    timeout_ms = self.load_timeout.as_millis() as u64,
                    "font read timed out"
                );
                Err(FontLoadError::new(
                    name,
                    FontLoadErrorKind::Timeout(self.load_timeout),
                ))
            }
        }
    }
}

impl FontProvider for FileFontProvider {
    type Font = TtfFont;

    async fn load(&self, locator: &FontLocator) -> Result<TtfFont, FontLoadError> {
        let path = self.resolve(locator);
        let name = locator.to_string();
        debug!(locator = %name, path = %path.display(), "loading font");

        let bytes = self.read_bounded(&name, tokio::fs::read(&path)).await?;
        TtfFont::from_bytes(&name, bytes)
    }
}
