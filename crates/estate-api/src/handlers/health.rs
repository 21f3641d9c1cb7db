//! Health and rate-limit status handlers.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

use crate::AppState;

/// Liveness plus cache freshness. Does not trigger a rate fetch.
#[utoipa::path(get, path = "/health", tag = "System",
    responses((status = 200, description = "Server is up")))]
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let rates = state.rates.current().await.map(|table| {
        serde_json::json!({
            "base": table.base,
            "updatedAt": table.updated_at,
            "fallback": table.fallback,
        })
    });
    let translations = state.translations.stats().await;

    Json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "store": state.search.store_name(),
        "rates": rates,
        "translationCache": {
            "backend": state.translations.backend_name(),
            "entries": translations.entries,
            "hits": translations.hits,
            "misses": translations.misses,
        },
    }))
}

/// Get rate limiting status.
pub async fn rate_limit_status(State(state): State<AppState>) -> impl IntoResponse {
    if state.rate_limiter.is_some() {
        Json(serde_json::json!({
            "enabled": true,
            "message": "Rate limiting is active"
        }))
    } else {
        Json(serde_json::json!({
            "enabled": false,
            "message": "Rate limiting is disabled"
        }))
    }
}
