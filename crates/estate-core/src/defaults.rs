//! Centralized default constants for estate-search.
//!
//! All crates and the API server reference these constants instead of
//! defining their own magic numbers. Environment variables override most of
//! them at start-up.

// =============================================================================
// PAGINATION
// =============================================================================

/// Default page number when the caller omits or garbles `page`.
pub const PAGE: u32 = 1;

/// Default page size for property search.
pub const PAGE_LIMIT: u32 = 12;

/// Smallest accepted page size.
pub const PAGE_LIMIT_MIN: u32 = 1;

/// Largest accepted page size; larger requests are clamped.
pub const PAGE_LIMIT_MAX: u32 = 100;

// =============================================================================
// SEARCH
// =============================================================================

/// Content-store document type holding listings.
pub const LISTING_DOCUMENT_TYPE: &str = "property";

/// Bedroom sentinel meaning "this many or more".
pub const BEDS_OR_MORE: u32 = 5;

// =============================================================================
// CONTENT STORE (Sanity)
// =============================================================================

/// Default dataset name.
pub const SANITY_DATASET: &str = "production";

/// Default API version (date-pinned).
pub const SANITY_API_VERSION: &str = "2024-01-01";

// =============================================================================
// CURRENCY
// =============================================================================

/// Reference currency every stored price is expressed in.
pub const BASE_CURRENCY: &str = "EUR";

/// Default exchange-rate source (open.er-api.com compatible).
pub const RATES_URL: &str = "https://open.er-api.com/v6";

/// Background refresh interval for the rate table (seconds).
pub const RATES_REFRESH_SECS: u64 = 3600;

/// Shortest accepted background refresh interval (seconds).
pub const MIN_RATES_REFRESH_SECS: u64 = 1;

/// Longest accepted background refresh interval (seconds).
pub const MAX_RATES_REFRESH_SECS: u64 = 7 * 24 * 60 * 60;

/// Pinned approximate factors used when the rate source is unavailable.
pub const FALLBACK_RATES: &[(&str, f64)] = &[("EUR", 1.0), ("USD", 1.08), ("GBP", 0.86)];

// =============================================================================
// TRANSLATION
// =============================================================================

/// Default LibreTranslate-compatible endpoint.
pub const TRANSLATE_URL: &str = "http://localhost:5000";

/// Number of leading characters of the source text used in a cache key.
pub const TRANSLATION_KEY_PREFIX_CHARS: usize = 100;

/// Service-boundary translation cache TTL (seconds).
pub const TRANSLATION_CACHE_TTL_SECS: u64 = 24 * 60 * 60;

/// Longest accepted cache entry lifetime (seconds).
pub const MAX_CACHE_TTL_SECS: u64 = 30 * 24 * 60 * 60;

/// Calling-side translation cache TTL (seconds).
pub const TRANSLATION_CLIENT_TTL_SECS: u64 = 60 * 60;

/// Maximum entries per translation cache tier.
pub const TRANSLATION_CACHE_CAPACITY: usize = 10_000;

/// Max-age advertised on translation responses (seconds).
pub const TRANSLATION_HTTP_MAX_AGE_SECS: u64 = 86_400;

// =============================================================================
// HTTP
// =============================================================================

/// Timeout applied to every outbound HTTP request (seconds).
pub const HTTP_TIMEOUT_SECS: u64 = 15;

// =============================================================================
// SERVER
// =============================================================================

/// Default HTTP server port.
pub const SERVER_PORT: u16 = 3000;

/// Default rate limit: max requests per period.
pub const RATE_LIMIT_REQUESTS: u32 = 100;

/// Default rate limit: period in seconds.
pub const RATE_LIMIT_PERIOD_SECS: u64 = 60;

/// Maximum accepted request body (bytes).
pub const MAX_BODY_BYTES: usize = 64 * 1024;
