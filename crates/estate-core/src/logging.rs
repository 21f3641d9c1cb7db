//! Structured logging field names for estate-search.
//!
//! All crates use these constants for consistent structured logging fields,
//! so log aggregation can query by the same names across subsystems.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Degraded service, requires operator attention |
//! | WARN  | Recoverable issue, automatic fallback applied |
//! | INFO  | Lifecycle events (startup, shutdown), operation completions |
//! | DEBUG | Decision points, cache hits/misses, rejected input |
//! | TRACE | Per-item iteration (individual listings, compiled queries) |

// ─── Identity fields ───────────────────────────────────────────────────────

/// Subsystem originating the log event.
/// Values: "api", "search", "store", "rates", "translate"
pub const SUBSYSTEM: &str = "subsystem";

/// Component within a subsystem.
/// Examples: "sanity", "rate_cache", "translation_cache", "libretranslate"
pub const COMPONENT: &str = "component";

/// Logical operation name.
/// Examples: "search", "fetch_listings", "refresh", "translate"
pub const OPERATION: &str = "op";

// ─── Search fields ─────────────────────────────────────────────────────────

/// Number of active filter fields in a search.
pub const FILTER_COUNT: &str = "filter_count";

/// Requested page number.
pub const PAGE: &str = "page";

/// Requested page size.
pub const LIMIT: &str = "limit";

/// Total matching listings reported by the count query.
pub const TOTAL: &str = "total";

/// Sequence token of a search request.
pub const SEQUENCE: &str = "sequence";

// ─── Measurement fields ────────────────────────────────────────────────────

/// Wall-clock duration in milliseconds.
pub const DURATION_MS: &str = "duration_ms";

/// Number of results returned by a query.
pub const RESULT_COUNT: &str = "result_count";

// ─── Cache fields ──────────────────────────────────────────────────────────

/// Cache tier ("client", "server").
pub const CACHE_TIER: &str = "cache_tier";

/// Whether the cache satisfied the lookup.
pub const CACHE_HIT: &str = "cache_hit";

/// Target language code.
pub const LANGUAGE: &str = "language";

/// Currency code.
pub const CURRENCY: &str = "currency";

// ─── Outcome fields ────────────────────────────────────────────────────────

/// Error message when an operation fails.
pub const ERROR_MSG: &str = "error";

/// Fallback values were used instead of live data.
pub const FALLBACK: &str = "fallback";
