use super::FontProvider;
use crate::error::FontLoadError;
use crate::style::FontLocator;
use std::collections::HashMap;
use tokio::sync::Mutex;
use tracing::debug;

/// Wraps a provider with a cache keyed by locator.
///
/// Failed loads are not cached, so a later request retries the inner provider.
pub struct CachedFontProvider<P: FontProvider> {
    inner: P,
    fonts: Mutex<HashMap<FontLocator, P::Font>>,
}

impl<P: FontProvider> CachedFontProvider<P> {
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            fonts: Mutex::new(HashMap::new()),
        }
    }

    pub async fn cached_count(&self) -> usize {
        self.fonts.lock().await.len()
    }

    pub async fn clear(&self) {
        self.fonts.lock().await.clear();
    }
}

impl<P> FontProvider for CachedFontProvider<P>
where
    P: FontProvider + Sync,
    P::Font: Clone,
{
    type Font = P::Font;

    async fn load(&self, locator: &FontLocator) -> Result<P::Font, FontLoadError> {
        if let Some(font) = self.fonts.lock().await.get(locator) {
            debug!(locator = %locator, "font cache hit");
            return Ok(font.clone());
        }

        let font = self.inner.load(locator).await?;
        self.fonts
            .lock()
            .await
            .insert(locator.clone(), font.clone());
        Ok(font)
    }
}
