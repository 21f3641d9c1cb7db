//! Service layer shared by the HTTP handlers.

pub mod rate_cache;
pub mod translation_cache;

pub use rate_cache::{RateCache, RefreshHandle};
pub use translation_cache::TranslationCache;
