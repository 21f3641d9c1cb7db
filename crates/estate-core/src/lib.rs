//! # estate-core
//!
//! Core types, traits, and abstractions for estate-search.
//!
//! This crate provides the listing model, the search filter validator,
//! pagination rules, the currency rate table, translation cache keys, and
//! the traits implemented by remote collaborators. Every other crate in the
//! workspace depends on it.

pub mod defaults;
pub mod error;
pub mod filter;
pub mod language;
pub mod logging;
pub mod models;
pub mod pagination;
pub mod rates;
pub mod traits;
pub mod translation;
pub mod ttl_cache;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use filter::{BedsFilter, ListingFilter, RawSearchParams};
pub use language::Language;
pub use models::{Address, Listing, ListingStatus, SearchResults};
pub use pagination::Pagination;
pub use rates::{format_price, normalize_currency, RateTable};
pub use traits::*;
pub use translation::{passthrough, CacheKeyStrategy, Translated, TranslationKey};
pub use ttl_cache::{CacheEntry, CacheStats, TtlCache};
