//! # estate-providers
//!
//! Remote collaborators of estate-search.
//!
//! This crate provides:
//! - [`HttpRateSource`]: exchange rates from an open.er-api.com compatible service
//! - [`LibreTranslateBackend`]: machine translation via LibreTranslate
//! - [`ApiTranslator`]: client of the server's own translation endpoint
//! - [`CachedTranslator`]: calling-side translation cache that never fails
//!
//! # Feature Flags
//!
//! - `mock`: mock providers with call counters, for tests in other crates

pub mod api_client;
pub mod cached_translator;
pub mod exchange;
pub mod libretranslate;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

// Re-export core traits
pub use estate_core::{RateSource, TranslationBackend, Translator};

pub use api_client::ApiTranslator;
pub use cached_translator::{CachedTranslator, TranslationOutcome};
pub use exchange::HttpRateSource;
pub use libretranslate::LibreTranslateBackend;
