//! Server configuration from environment variables.
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | HOST | 0.0.0.0 | Bind address |
//! | PORT | 3000 | Bind port |
//! | ALLOWED_ORIGINS | http://localhost:3000 | Comma-separated CORS origins |
//! | RATE_LIMIT_ENABLED | true | Global request rate limiting |
//! | RATE_LIMIT_REQUESTS | 100 | Requests per period |
//! | RATE_LIMIT_PERIOD_SECS | 60 | Rate limit period |
//! | RATES_REFRESH_SECS | 3600 | Exchange-rate refresh interval |
//! | TRANSLATION_CACHE_TTL_SECS | 86400 | Server translation cache TTL |
//! | TRANSLATION_CACHE_CAPACITY | 10000 | Server translation cache size |
//! | TRANSLATION_CACHE_KEY | prefix | `prefix` or `hash` |
//!
//! Content store, rate source and translation backend read their own
//! variables (`SANITY_*`, `RATES_*`, `TRANSLATE_*`).

use std::time::Duration;

use axum::http::HeaderValue;
use tracing::warn;

use estate_core::{defaults, CacheKeyStrategy};

/// Runtime configuration of the HTTP server.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
    pub allowed_origins: Vec<HeaderValue>,
    pub rate_limit_enabled: bool,
    pub rate_limit_requests: u32,
    pub rate_limit_period: Duration,
    pub rates_refresh: Duration,
    pub translation_ttl: Duration,
    pub translation_capacity: usize,
    pub translation_key: CacheKeyStrategy,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: defaults::SERVER_PORT,
            allowed_origins: vec![HeaderValue::from_static("http://localhost:3000")],
            rate_limit_enabled: true,
            rate_limit_requests: defaults::RATE_LIMIT_REQUESTS,
            rate_limit_period: Duration::from_secs(defaults::RATE_LIMIT_PERIOD_SECS),
            rates_refresh: Duration::from_secs(defaults::RATES_REFRESH_SECS),
            translation_ttl: Duration::from_secs(defaults::TRANSLATION_CACHE_TTL_SECS),
            translation_capacity: defaults::TRANSLATION_CACHE_CAPACITY,
            translation_key: CacheKeyStrategy::Prefix,
        }
    }
}

impl ApiConfig {
    pub fn from_env() -> Self {
        let base = Self::default();

        let translation_key = match std::env::var("TRANSLATION_CACHE_KEY") {
            Ok(v) => CacheKeyStrategy::parse(&v).unwrap_or_else(|| {
                warn!("Unknown TRANSLATION_CACHE_KEY '{}', using prefix keys", v);
                CacheKeyStrategy::Prefix
            }),
            Err(_) => base.translation_key,
        };

        Self {
            host: std::env::var("HOST").unwrap_or(base.host),
            port: env_parse("PORT").unwrap_or(base.port),
            allowed_origins: std::env::var("ALLOWED_ORIGINS")
                .map(|v| parse_allowed_origins(&v))
                .ok()
                .filter(|origins| !origins.is_empty())
                .unwrap_or(base.allowed_origins),
            rate_limit_enabled: std::env::var("RATE_LIMIT_ENABLED")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(base.rate_limit_enabled),
            rate_limit_requests: env_parse("RATE_LIMIT_REQUESTS").unwrap_or(base.rate_limit_requests),
            rate_limit_period: env_parse("RATE_LIMIT_PERIOD_SECS")
                .map(Duration::from_secs)
                .unwrap_or(base.rate_limit_period),
            rates_refresh: bounded_secs(
                "RATES_REFRESH_SECS",
                env_parse("RATES_REFRESH_SECS"),
                base.rates_refresh,
                defaults::MAX_RATES_REFRESH_SECS,
            ),
            translation_ttl: bounded_secs(
                "TRANSLATION_CACHE_TTL_SECS",
                env_parse("TRANSLATION_CACHE_TTL_SECS"),
                base.translation_ttl,
                defaults::MAX_CACHE_TTL_SECS,
            ),
            translation_capacity: env_parse("TRANSLATION_CACHE_CAPACITY")
                .unwrap_or(base.translation_capacity),
            translation_key,
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

/// Seconds from the environment: zero keeps the default, values above `max`
/// are capped.
fn bounded_secs(name: &str, value: Option<u64>, default: Duration, max: u64) -> Duration {
    match value {
        None => default,
        Some(0) => {
            warn!("{} must be positive, using {}s", name, default.as_secs());
            default
        }
        Some(secs) if secs > max => {
            warn!("{} of {}s exceeds the maximum, using {}s", name, secs, max);
            Duration::from_secs(max)
        }
        Some(secs) => Duration::from_secs(secs),
    }
}

/// Parse a comma-separated origin list, skipping invalid entries.
pub fn parse_allowed_origins(origins: &str) -> Vec<HeaderValue> {
    origins
        .split(',')
        .filter_map(|s| {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            match trimmed.parse::<HeaderValue>() {
                Ok(v) => Some(v),
                Err(e) => {
                    warn!("Invalid CORS origin '{}': {}", trimmed, e);
                    None
                }
            }
        })
        .collect()
}
