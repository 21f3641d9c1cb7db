//! Router-level tests driven through `tower::ServiceExt::oneshot`.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use estate_api::{build_rate_limiter, build_router, ApiConfig, AppState, RateCache, TranslationCache};
use estate_providers::mock::{MockRateSource, MockTranslationBackend};
use estate_search::SearchService;
use estate_store::test_fixtures::{kassandra_villa, thessaloniki_flat};
use estate_store::InMemoryStore;

struct Harness {
    store: Arc<InMemoryStore>,
    rate_source: Arc<MockRateSource>,
    backend: Arc<MockTranslationBackend>,
    state: AppState,
}

impl Harness {
    fn new() -> Self {
        let store = Arc::new(InMemoryStore::new(vec![kassandra_villa(), thessaloniki_flat()]));
        let rate_source = Arc::new(MockRateSource::new());
        let backend = Arc::new(MockTranslationBackend::new());
        let state = AppState {
            search: SearchService::new(store.clone()),
            rates: Arc::new(RateCache::new(rate_source.clone())),
            translations: Arc::new(TranslationCache::with_defaults(backend.clone())),
            rate_limiter: None,
        };
        Self {
            store,
            rate_source,
            backend,
            state,
        }
    }

    fn router(&self) -> Router {
        build_router(self.state.clone(), &ApiConfig::default())
    }
}

async fn send(router: Router, request: Request<Body>) -> (StatusCode, axum::http::HeaderMap, Value) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, headers, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

// =============================================================================
// SEARCH
// =============================================================================

#[tokio::test]
async fn test_search_kassandra_scenario() {
    let h = Harness::new();
    let (status, headers, body) = send(
        h.router(),
        get("/api/properties/search?location=Kassandra&minPrice=100000&maxPrice=300000"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(headers.contains_key("x-request-id"));
    assert_eq!(body["success"], true);
    assert_eq!(body["total"], 1);
    assert_eq!(body["hasMore"], false);
    assert_eq!(body["properties"][0]["_id"], "prop-kassandra-1");
    assert_eq!(body["filters"]["location"], "Kassandra");
    assert_eq!(body["filters"]["minPrice"], 100000.0);
    assert_eq!(body["page"], 1);
    assert_eq!(body["limit"], 12);
}

#[tokio::test]
async fn test_search_inverted_range_is_400_without_store_call() {
    let h = Harness::new();
    let (status, _, body) = send(
        h.router(),
        get("/api/properties/search?minPrice=500000&maxPrice=100000"),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("invalid price range"));
    assert_eq!(body["properties"], serde_json::json!([]));
    assert_eq!(body["total"], 0);
    assert_eq!(h.store.query_count(), 0);
}

#[tokio::test]
async fn test_search_store_failure_is_500() {
    let h = Harness::new();
    h.store.set_failing(true);
    let (status, _, body) = send(h.router(), get("/api/properties/search")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
    assert_eq!(body["total"], 0);
}

#[tokio::test]
async fn test_search_clamps_limit() {
    let h = Harness::new();
    let (status, _, body) = send(h.router(), get("/api/properties/search?limit=1000&page=0")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["limit"], 100);
    assert_eq!(body["page"], 1);
    assert_eq!(body["total"], 2);
}

#[tokio::test]
async fn test_search_repeated_key_keeps_failure_envelope() {
    let h = Harness::new();
    for uri in [
        "/api/properties/search?location=a&location=b",
        "/api/properties/search?minPrice=1&minPrice=9999999",
    ] {
        let (status, _, body) = send(h.router(), get(uri)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(body["success"], false);
        assert!(body["error"].as_str().unwrap().contains("duplicate field"));
        assert_eq!(body["properties"], serde_json::json!([]));
        assert_eq!(body["total"], 0);
    }
    assert_eq!(h.store.query_count(), 0);
}

#[tokio::test]
async fn test_search_wildcard_only_location_is_no_filter() {
    let h = Harness::new();
    let (status, _, body) = send(h.router(), get("/api/properties/search?location=***")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 2);
    assert!(body["filters"].get("location").is_none());
}

// =============================================================================
// RATES
// =============================================================================

#[tokio::test]
async fn test_get_rates() {
    let h = Harness::new();
    let (status, _, body) = send(h.router(), get("/api/rates")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["base"], "EUR");
    assert_eq!(body["rates"]["EUR"], 1.0);
    assert_eq!(body["rates"]["USD"], 1.1);
    assert!(body["updatedAt"].is_string());
    assert_eq!(body["fallback"], false);
}

#[tokio::test]
async fn test_get_rates_with_unavailable_source_serves_fallback() {
    let h = Harness::new();
    h.rate_source.set_failing(true);
    let (status, _, body) = send(h.router(), get("/api/rates")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["fallback"], true);
    assert_eq!(body["rates"]["USD"], 1.08);
    assert_eq!(body["rates"]["GBP"], 0.86);
}

#[tokio::test]
async fn test_convert_between_currencies() {
    let h = Harness::new();
    let (status, _, body) = send(
        h.router(),
        post_json("/api/rates", serde_json::json!({"amount": 1000, "from": "eur", "to": "GBP"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["amount"], 850.0);
    assert_eq!(body["from"], "EUR");
    assert_eq!(body["to"], "GBP");
}

#[tokio::test]
async fn test_convert_unsupported_currency_lists_codes() {
    let h = Harness::new();
    let (status, _, body) = send(
        h.router(),
        post_json("/api/rates", serde_json::json!({"amount": 1000, "from": "EUR", "to": "JPY"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let message = body["error"].as_str().unwrap();
    assert!(message.contains("JPY"));
    assert!(message.contains("EUR, GBP, USD"));
}

// =============================================================================
// TRANSLATION
// =============================================================================

#[tokio::test]
async fn test_translate_caches_and_sets_cache_control() {
    let h = Harness::new();
    let request = || post_json("/api/translate", serde_json::json!({"text": "Villa", "targetLanguage": "el"}));

    let (status, headers, first) = send(h.router(), request()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CACHE_CONTROL], "public, max-age=86400");
    assert_eq!(first["translation"], "[el] Villa");
    assert_eq!(first["cached"], false);
    assert_eq!(first["language"], "el");

    let (_, _, second) = send(h.router(), request()).await;
    assert_eq!(second["cached"], true);
    assert_eq!(h.backend.call_count(), 1);
}

#[tokio::test]
async fn test_translate_rejects_empty_text_and_unknown_language() {
    let h = Harness::new();

    let (status, _, body) = send(
        h.router(),
        post_json("/api/translate", serde_json::json!({"text": "  ", "targetLanguage": "el"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "text is required");

    let (status, _, body) = send(
        h.router(),
        post_json("/api/translate", serde_json::json!({"text": "Villa", "targetLanguage": "fr"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("en, el, ru, sr, bg, de"));
    assert_eq!(h.backend.call_count(), 0);
}

#[tokio::test]
async fn test_mistyped_json_bodies_are_400_with_error_body() {
    let h = Harness::new();
    let cases = [
        ("/api/translate", serde_json::json!({"text": 5, "targetLanguage": "el"})),
        ("/api/rates", serde_json::json!({"amount": 1000, "from": "EUR"})),
    ];
    for (uri, payload) in cases {
        let (status, _, body) = send(h.router(), post_json(uri, payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert!(body["error"].is_string(), "{}", uri);
    }

    let request = Request::builder()
        .method("POST")
        .uri("/api/translate")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, _, body) = send(h.router(), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
    assert_eq!(h.backend.call_count(), 0);
}

#[tokio::test]
async fn test_translate_backend_failure_is_500() {
    let h = Harness::new();
    h.backend.set_failing(true);
    let (status, _, body) = send(
        h.router(),
        post_json("/api/translate", serde_json::json!({"text": "Villa", "targetLanguage": "de"})),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].is_string());
}

// =============================================================================
// SYSTEM
// =============================================================================

#[tokio::test]
async fn test_health_does_not_fetch_rates() {
    let h = Harness::new();
    let (status, _, body) = send(h.router(), get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["store"], "memory");
    assert!(body["rates"].is_null());
    assert_eq!(h.rate_source.call_count(), 0);
}

#[tokio::test]
async fn test_openapi_lists_routes() {
    let h = Harness::new();
    let (status, _, body) = send(h.router(), get("/openapi.json")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/api/properties/search"].is_object());
    assert!(body["paths"]["/api/translate"]["post"].is_object());
}

#[tokio::test]
async fn test_rate_limiter_rejects_over_quota() {
    let mut h = Harness::new();
    h.state.rate_limiter = build_rate_limiter(1, std::time::Duration::from_secs(60));
    let router = h.router();

    let (first, _, _) = send(router.clone(), get("/health")).await;
    let (second, _, body) = send(router, get("/health")).await;

    assert_eq!(first, StatusCode::OK);
    assert_eq!(second, StatusCode::TOO_MANY_REQUESTS);
    assert!(body["error"].is_string());
}
