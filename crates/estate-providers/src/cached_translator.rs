//! Calling-side translation cache.
//!
//! Sits in front of any [`Translator`] (normally an
//! [`ApiTranslator`](crate::ApiTranslator)) with a short-lived in-memory LRU.
//! It never fails: when the remote call errors, the caller gets the original
//! text back together with an error message it may choose to display.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use estate_core::{
    defaults, passthrough, CacheKeyStrategy, CacheStats, Language, TranslationKey, Translator,
    TtlCache,
};

/// What the calling tier hands back for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationOutcome {
    /// Translated text, or the original text on failure.
    pub text: String,
    /// Set when the translation failed and `text` is the original.
    pub error: Option<String>,
}

impl TranslationOutcome {
    fn ok(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            error: None,
        }
    }

    fn failed(original: &str, error: impl Into<String>) -> Self {
        Self {
            text: original.to_string(),
            error: Some(error.into()),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Client-tier translation cache.
pub struct CachedTranslator {
    inner: Arc<dyn Translator>,
    cache: TtlCache<TranslationKey, String>,
    strategy: CacheKeyStrategy,
}

impl CachedTranslator {
    /// Wrap `inner` with the default one-hour TTL.
    pub fn new(inner: Arc<dyn Translator>) -> Self {
        Self::with_ttl(
            inner,
            Duration::from_secs(defaults::TRANSLATION_CLIENT_TTL_SECS),
        )
    }

    pub fn with_ttl(inner: Arc<dyn Translator>, ttl: Duration) -> Self {
        Self {
            inner,
            cache: TtlCache::new(defaults::TRANSLATION_CACHE_CAPACITY, ttl),
            strategy: CacheKeyStrategy::default(),
        }
    }

    pub fn with_strategy(mut self, strategy: CacheKeyStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Translate `text`, answering from the cache while the entry is live.
    pub async fn translate(&self, text: &str, target: Language) -> TranslationOutcome {
        if let Some(unchanged) = passthrough(text, target) {
            return TranslationOutcome::ok(unchanged);
        }

        let key = TranslationKey::new(text, target, self.strategy);
        if let Some(hit) = self.cache.get(&key).await {
            debug!(
                subsystem = "translate",
                component = "cached_translator",
                cache_tier = "client",
                cache_hit = true,
                language = %target,
                "Translation cache hit"
            );
            return TranslationOutcome::ok(hit);
        }

        match self.inner.translate(text, target).await {
            Ok(translated) => {
                self.cache.insert(key, translated.translation.clone()).await;
                TranslationOutcome::ok(translated.translation)
            }
            Err(e) => {
                warn!(
                    subsystem = "translate",
                    component = "cached_translator",
                    language = %target,
                    error = %e,
                    "Translation failed, showing original text"
                );
                TranslationOutcome::failed(text, e.to_string())
            }
        }
    }

    /// Like [`translate`](Self::translate), for a raw language code.
    /// Unsupported codes yield the original text with an error.
    pub async fn translate_code(&self, text: &str, code: &str) -> TranslationOutcome {
        match Language::from_code(code) {
            Ok(target) => self.translate(text, target).await,
            Err(e) => TranslationOutcome::failed(text, e.to_string()),
        }
    }

    pub async fn stats(&self) -> CacheStats {
        self.cache.stats().await
    }

    pub async fn clear(&self) {
        self.cache.clear().await;
    }
}
