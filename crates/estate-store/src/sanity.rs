//! Sanity content store client.
//!
//! Queries go through the HTTP query API:
//!
//! ```text
//! GET {base_url}/v{api_version}/data/query/{dataset}?query=<GROQ>&$name=<json>
//! ```
//!
//! Parameters travel as separate `$name` query-string entries holding JSON
//! values, so they are never interpolated into the GROQ text.
//!
//! ## Configuration
//!
//! Environment variables:
//! - `SANITY_PROJECT_ID`: project id (required unless `SANITY_BASE_URL` is set)
//! - `SANITY_BASE_URL`: full API origin, overrides the project-derived host
//! - `SANITY_DATASET`: dataset name (default: production)
//! - `SANITY_API_VERSION`: dated API version (default: 2024-01-01)
//! - `SANITY_TOKEN`: read token for private datasets (optional)
//! - `SANITY_USE_CDN`: "false" to bypass the API CDN (default: true)
//! - `HTTP_TIMEOUT_SECS`: request timeout (default: 15)

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use estate_core::{defaults, Error, Listing, Result};

use crate::query_builder::{CompiledQuery, QueryParam};
use crate::store::ContentStore;

/// Connection settings for a Sanity dataset.
#[derive(Debug, Clone)]
pub struct SanityConfig {
    /// API origin, e.g. `https://abc123.apicdn.sanity.io`.
    pub base_url: String,
    pub dataset: String,
    pub api_version: String,
    pub token: Option<String>,
    pub timeout_secs: u64,
}

impl SanityConfig {
    /// Build a config for a project id with default dataset and version.
    pub fn for_project(project_id: &str, use_cdn: bool) -> Self {
        let host = if use_cdn { "apicdn" } else { "api" };
        Self {
            base_url: format!("https://{}.{}.sanity.io", project_id, host),
            dataset: defaults::SANITY_DATASET.to_string(),
            api_version: defaults::SANITY_API_VERSION.to_string(),
            token: None,
            timeout_secs: defaults::HTTP_TIMEOUT_SECS,
        }
    }

    /// Read configuration from the environment.
    pub fn from_env() -> Result<Self> {
        let use_cdn = std::env::var("SANITY_USE_CDN")
            .map(|v| v != "false" && v != "0")
            .unwrap_or(true);

        let mut config = match std::env::var("SANITY_BASE_URL") {
            Ok(base_url) if !base_url.trim().is_empty() => Self {
                base_url: base_url.trim().trim_end_matches('/').to_string(),
                ..Self::for_project("", use_cdn)
            },
            _ => {
                let project_id = std::env::var("SANITY_PROJECT_ID").map_err(|_| {
                    Error::Config("SANITY_PROJECT_ID or SANITY_BASE_URL must be set".to_string())
                })?;
                Self::for_project(project_id.trim(), use_cdn)
            }
        };

        if let Ok(dataset) = std::env::var("SANITY_DATASET") {
            config.dataset = dataset;
        }
        if let Ok(version) = std::env::var("SANITY_API_VERSION") {
            config.api_version = version.trim_start_matches('v').to_string();
        }
        config.token = std::env::var("SANITY_TOKEN").ok().filter(|t| !t.is_empty());
        config.timeout_secs = std::env::var("HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults::HTTP_TIMEOUT_SECS);

        Ok(config)
    }

    /// Query endpoint URL.
    pub fn query_url(&self) -> String {
        format!(
            "{}/v{}/data/query/{}",
            self.base_url, self.api_version, self.dataset
        )
    }
}

/// Envelope of every query response.
#[derive(Debug, Deserialize)]
struct QueryResponse<T> {
    result: T,
}

/// Error body returned by the query API.
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    description: Option<String>,
}

/// Content store backed by a Sanity dataset.
pub struct SanityStore {
    client: Client,
    config: SanityConfig,
}

impl SanityStore {
    pub fn new(config: SanityConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::Config(format!("failed to create HTTP client: {}", e)))?;

        debug!(
            subsystem = "store",
            component = "sanity",
            url = %config.query_url(),
            authenticated = config.token.is_some(),
            "Initializing Sanity content store"
        );

        Ok(Self { client, config })
    }

    pub fn from_env() -> Result<Self> {
        Self::new(SanityConfig::from_env()?)
    }

    pub fn config(&self) -> &SanityConfig {
        &self.config
    }

    /// Run one GROQ query with bound parameters.
    async fn query<T: DeserializeOwned>(
        &self,
        groq: &str,
        params: &BTreeMap<String, QueryParam>,
    ) -> Result<T> {
        let mut pairs = Vec::with_capacity(params.len() + 1);
        pairs.push(("query".to_string(), groq.to_string()));
        for (name, value) in params {
            pairs.push((format!("${}", name), value.to_json().to_string()));
        }

        let mut request = self.client.get(self.config.query_url()).query(&pairs);
        if let Some(ref token) = self.config.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<ErrorResponse>(&body)
                .ok()
                .and_then(|e| e.error.description)
                .unwrap_or(body);
            warn!(
                subsystem = "store",
                component = "sanity",
                status = status.as_u16(),
                error = %detail,
                "Content store query failed"
            );
            return Err(Error::Upstream(format!(
                "content store returned {}: {}",
                status, detail
            )));
        }

        let envelope: QueryResponse<T> = response.json().await?;
        Ok(envelope.result)
    }
}

#[async_trait]
impl ContentStore for SanityStore {
    #[instrument(skip(self, query), fields(
        subsystem = "store",
        component = "sanity",
        op = "fetch_listings",
    ))]
    async fn fetch_listings(&self, query: &CompiledQuery) -> Result<Vec<Listing>> {
        let start = Instant::now();
        let listings: Vec<Listing> = self.query(&query.listing_query, &query.params).await?;
        debug!(
            result_count = listings.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Listing query complete"
        );
        Ok(listings)
    }

    #[instrument(skip(self, query), fields(
        subsystem = "store",
        component = "sanity",
        op = "count_listings",
    ))]
    async fn count_listings(&self, query: &CompiledQuery) -> Result<u64> {
        let start = Instant::now();
        let total: u64 = self.query(&query.count_query, &query.params).await?;
        debug!(
            total,
            duration_ms = start.elapsed().as_millis() as u64,
            "Count query complete"
        );
        Ok(total)
    }

    fn name(&self) -> &str {
        "sanity"
    }
}
