//! Trait definitions for the remote collaborators of the search pipeline.
//!
//! These traits define the seams where HTTP-backed implementations and test
//! doubles plug in. Cache objects take them as `Arc<dyn Trait>` so tests can
//! substitute fixtures.

use async_trait::async_trait;

use crate::error::Result;
use crate::language::Language;
use crate::rates::RateTable;
use crate::translation::Translated;

// =============================================================================
// CURRENCY
// =============================================================================

/// Remote source of currency conversion factors.
#[async_trait]
pub trait RateSource: Send + Sync {
    /// Fetch a fresh table relative to the source's base currency.
    async fn fetch_rates(&self) -> Result<RateTable>;

    /// Source name for logging.
    fn name(&self) -> &str;
}

// =============================================================================
// TRANSLATION
// =============================================================================

/// Machine-translation backend. Every call has latency and cost.
#[async_trait]
pub trait TranslationBackend: Send + Sync {
    /// Translate `text` from `source` into `target`.
    async fn translate(&self, text: &str, source: Language, target: Language) -> Result<String>;

    /// Backend name for logging.
    fn name(&self) -> &str;
}

/// Anything that answers translation requests the way the translation
/// endpoint does: the service-boundary cache in-process, or an HTTP client
/// of the endpoint.
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, text: &str, target: Language) -> Result<Translated>;
}
