//! # estate-api
//!
//! HTTP API server for estate-search.
//!
//! Routes:
//! - `GET  /api/properties/search`: filtered, paginated listing search
//! - `GET  /api/rates`: current exchange-rate table
//! - `POST /api/rates`: convert an amount between currencies
//! - `POST /api/translate`: cached machine translation
//! - `GET  /health`, `GET /api/rate-limit/status`
//! - `GET  /openapi.json`, Swagger UI at `/docs`

pub mod config;
pub mod error;
pub mod handlers;
pub mod services;

use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use axum::http::{header, Method};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{extract::State, Json, Router};
use governor::{Quota, RateLimiter};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::warn;
use utoipa::OpenApi;
use utoipa_swagger_ui::{Config, SwaggerUi};
use uuid::Uuid;

use estate_core::defaults;
use estate_search::SearchService;

pub use config::ApiConfig;
pub use error::ApiError;
pub use services::{RateCache, RefreshHandle, TranslationCache};

/// Global rate limiter type (direct quota, no keyed bucketing).
pub type GlobalRateLimiter = RateLimiter<
    governor::state::NotKeyed,
    governor::state::InMemoryState,
    governor::clock::DefaultClock,
>;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub search: SearchService,
    pub rates: Arc<RateCache>,
    pub translations: Arc<TranslationCache>,
    /// Global rate limiter (None if rate limiting is disabled).
    pub rate_limiter: Option<Arc<GlobalRateLimiter>>,
}

/// Generates time-ordered UUIDv7 request correlation IDs.
#[derive(Clone, Default)]
pub struct MakeRequestUuidV7;

impl MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let id = Uuid::now_v7().to_string().parse().ok()?;
        Some(RequestId::new(id))
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Estate Search API",
        description = "Property search, currency conversion and listing translation"
    ),
    paths(
        handlers::search::search_properties,
        handlers::rates::get_rates,
        handlers::rates::convert,
        handlers::translate::translate,
        handlers::health::health_check,
    ),
    components(schemas(
        handlers::search::SearchResponse,
        handlers::search::SearchFailure,
        handlers::rates::RatesResponse,
        handlers::rates::ConvertRequest,
        handlers::rates::ConvertResponse,
        handlers::translate::TranslateRequest,
        handlers::translate::TranslateResponse,
    )),
    tags(
        (name = "Search", description = "Listing search"),
        (name = "Currency", description = "Exchange rates and conversion"),
        (name = "Translation", description = "Cached machine translation"),
        (name = "System", description = "Health and status"),
    )
)]
pub struct ApiDoc;

async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}

/// Build the global rate limiter, or `None` if the quota is unusable.
pub fn build_rate_limiter(requests: u32, period: Duration) -> Option<Arc<GlobalRateLimiter>> {
    let Some(burst) = NonZeroU32::new(requests) else {
        warn!("RATE_LIMIT_REQUESTS is zero, rate limiting disabled");
        return None;
    };
    let Some(quota) = Quota::with_period(period) else {
        warn!("RATE_LIMIT_PERIOD_SECS is zero, rate limiting disabled");
        return None;
    };
    Some(Arc::new(RateLimiter::direct(quota.allow_burst(burst))))
}

async fn rate_limit_middleware(
    State(state): State<AppState>,
    request: axum::extract::Request,
    next: axum::middleware::Next,
) -> Result<impl IntoResponse, ApiError> {
    if let Some(limiter) = &state.rate_limiter {
        if limiter.check().is_err() {
            warn!("Rate limit exceeded");
            return Err(ApiError::RateLimited);
        }
    }
    Ok(next.run(request).await)
}

/// Assemble the router with all routes and middleware.
pub fn build_router(state: AppState, config: &ApiConfig) -> Router {
    use handlers::{health, rates, search, translate};

    Router::new()
        .route("/health", get(health::health_check))
        .merge(
            SwaggerUi::new("/docs").config(
                Config::new(["/openapi.json"])
                    .try_it_out_enabled(true)
                    .display_request_duration(true),
            ),
        )
        .route("/openapi.json", get(openapi_json))
        .route("/api/properties/search", get(search::search_properties))
        .route("/api/rates", get(rates::get_rates).post(rates::convert))
        .route("/api/translate", axum::routing::post(translate::translate))
        .route("/api/rate-limit/status", get(health::rate_limit_status))
        // Middleware
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
        .layer(
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(config.allowed_origins.clone()))
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
                .max_age(Duration::from_secs(3600)),
        )
        .layer(RequestBodyLimitLayer::new(defaults::MAX_BODY_BYTES))
        .with_state(state)
}
