use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use estate_api::{build_rate_limiter, build_router, ApiConfig, AppState, RateCache, TranslationCache};
use estate_providers::{HttpRateSource, LibreTranslateBackend};
use estate_search::SearchService;
use estate_store::{ContentStore, InMemoryStore, SanityStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing with configurable output
    //
    // Environment variables:
    //   LOG_FORMAT  - "json" or "text" (default: "text")
    //   LOG_FILE    - path to log file (optional, enables file logging)
    //   LOG_ANSI    - "true"/"false" override ANSI colors (auto-detected by default)
    //   RUST_LOG    - standard env filter (default: "estate_api=debug,tower_http=debug")
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let log_file = std::env::var("LOG_FILE").ok();
    let log_ansi = std::env::var("LOG_ANSI")
        .ok()
        .map(|v| v == "true" || v == "1");

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "estate_api=debug,tower_http=debug".into());

    let registry = tracing_subscriber::registry().with(env_filter);

    let _file_guard = if let Some(ref path) = log_file {
        let file_dir = std::path::Path::new(path)
            .parent()
            .unwrap_or(std::path::Path::new("."));
        let file_name = std::path::Path::new(path)
            .file_name()
            .and_then(|f| f.to_str())
            .unwrap_or("estate-api.log");
        let file_appender = tracing_appender::rolling::daily(file_dir, file_name);
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        if log_format == "json" {
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(non_blocking),
                )
                .init();
        } else {
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(log_ansi.unwrap_or(false)); // no ANSI in files by default
            registry.with(layer).init();
        }
        Some(guard)
    } else {
        if log_format == "json" {
            registry
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        } else {
            let mut layer = tracing_subscriber::fmt::layer();
            if let Some(ansi) = log_ansi {
                layer = layer.with_ansi(ansi);
            }
            registry.with(layer).init();
        }
        None
    };

    info!(
        log_format = %log_format,
        log_file = log_file.as_deref().unwrap_or("(stdout)"),
        "Logging initialized"
    );

    let config = ApiConfig::from_env();

    info!(
        "Rate limiting: {} ({} requests per {} seconds)",
        if config.rate_limit_enabled {
            "enabled"
        } else {
            "disabled"
        },
        config.rate_limit_requests,
        config.rate_limit_period.as_secs()
    );

    // Content store: Sanity when configured, otherwise an empty local store
    let sanity_configured = std::env::var("SANITY_PROJECT_ID").is_ok()
        || std::env::var("SANITY_BASE_URL").is_ok();
    let store: Arc<dyn ContentStore> = if sanity_configured {
        let store = SanityStore::from_env()?;
        info!(url = %store.config().query_url(), "Content store: Sanity");
        Arc::new(store)
    } else {
        warn!("SANITY_PROJECT_ID not set, serving an empty in-memory content store");
        Arc::new(InMemoryStore::default())
    };
    let search = SearchService::new(store);

    let rate_source = HttpRateSource::from_env()?;
    info!(currency = %rate_source.base_currency(), "Rate source initialized");
    let rates = Arc::new(RateCache::new(Arc::new(rate_source)));
    // Warm the table so the first request does not wait on the source
    rates.refresh().await;
    let _refresh_handle = rates.spawn_refresh(config.rates_refresh);
    info!(
        interval_secs = config.rates_refresh.as_secs(),
        "Rate refresh scheduled"
    );

    let translations = Arc::new(
        TranslationCache::new(
            Arc::new(LibreTranslateBackend::from_env()?),
            config.translation_ttl,
            config.translation_capacity,
        )
        .with_strategy(config.translation_key),
    );
    info!(
        ttl_secs = config.translation_ttl.as_secs(),
        capacity = config.translation_capacity,
        "Translation cache initialized"
    );

    let rate_limiter = if config.rate_limit_enabled {
        build_rate_limiter(config.rate_limit_requests, config.rate_limit_period)
    } else {
        None
    };

    let state = AppState {
        search,
        rates,
        translations,
        rate_limiter,
    };
    let app = build_router(state, &config);

    // Start server
    let addr: SocketAddr = config.bind_address().parse()?;
    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
