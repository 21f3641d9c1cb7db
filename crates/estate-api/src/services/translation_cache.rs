//! Service-boundary translation cache.
//!
//! Answers translation requests from an in-memory TTL cache and calls the
//! machine-translation backend only on a miss. Entries are keyed by text
//! prefix and target language (see [`TranslationKey`]).
//!
//! ## Configuration
//!
//! Environment variables:
//! - `TRANSLATION_CACHE_TTL_SECS`: entry lifetime (default: 86400)
//! - `TRANSLATION_CACHE_CAPACITY`: maximum entries (default: 10000)

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tracing::{debug, instrument};

use estate_core::{
    defaults, passthrough, CacheKeyStrategy, CacheStats, Language, Result, Translated,
    TranslationBackend, TranslationKey, Translator, TtlCache,
};

/// Server-tier translation cache in front of a [`TranslationBackend`].
pub struct TranslationCache {
    backend: Arc<dyn TranslationBackend>,
    cache: TtlCache<TranslationKey, String>,
    strategy: CacheKeyStrategy,
}

impl TranslationCache {
    pub fn new(backend: Arc<dyn TranslationBackend>, ttl: Duration, capacity: usize) -> Self {
        Self {
            backend,
            cache: TtlCache::new(capacity, ttl),
            strategy: CacheKeyStrategy::default(),
        }
    }

    /// Cache with the default TTL and capacity.
    pub fn with_defaults(backend: Arc<dyn TranslationBackend>) -> Self {
        Self::new(
            backend,
            Duration::from_secs(defaults::TRANSLATION_CACHE_TTL_SECS),
            defaults::TRANSLATION_CACHE_CAPACITY,
        )
    }

    pub fn with_strategy(mut self, strategy: CacheKeyStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    pub async fn stats(&self) -> CacheStats {
        self.cache.stats().await
    }

    /// Translate `text`, reporting whether the cache answered.
    #[instrument(skip(self, text), fields(
        subsystem = "translate",
        component = "translation_cache",
        op = "translate",
        cache_tier = "server",
        language = %target,
    ))]
    pub async fn translate(&self, text: &str, target: Language) -> Result<Translated> {
        if let Some(unchanged) = passthrough(text, target) {
            return Ok(Translated {
                translation: unchanged.to_string(),
                cached: false,
                language: target,
            });
        }

        let key = TranslationKey::new(text, target, self.strategy);
        if let Some(hit) = self.cache.get(&key).await {
            debug!(cache_hit = true, "Translation cache hit");
            return Ok(Translated {
                translation: hit,
                cached: true,
                language: target,
            });
        }

        let start = Instant::now();
        let translation = self
            .backend
            .translate(text, Language::SOURCE, target)
            .await?;
        self.cache.insert(key, translation.clone()).await;
        debug!(
            cache_hit = false,
            backend = %self.backend.name(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Translation cached"
        );

        Ok(Translated {
            translation,
            cached: false,
            language: target,
        })
    }
}

#[async_trait]
impl Translator for TranslationCache {
    async fn translate(&self, text: &str, target: Language) -> Result<Translated> {
        TranslationCache::translate(self, text, target).await
    }
}
