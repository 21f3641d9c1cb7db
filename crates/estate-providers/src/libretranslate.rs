//! LibreTranslate machine-translation backend.
//!
//! `POST {base_url}/translate` with `{q, source, target, format}` (plus
//! `api_key` when configured) returns `{"translatedText": "..."}`.
//!
//! Environment variables:
//! - `TRANSLATE_URL` (default: http://localhost:5000)
//! - `TRANSLATE_API_KEY` (optional)
//! - `HTTP_TIMEOUT_SECS` (default: 15)

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use estate_core::{defaults, Error, Language, Result, TranslationBackend};

#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TranslateResponse {
    translated_text: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
}

/// LibreTranslate HTTP backend.
pub struct LibreTranslateBackend {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl LibreTranslateBackend {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>, timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| Error::Config(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.filter(|k| !k.is_empty()),
        })
    }

    pub fn from_env() -> Result<Self> {
        let base_url =
            std::env::var("TRANSLATE_URL").unwrap_or_else(|_| defaults::TRANSLATE_URL.to_string());
        let api_key = std::env::var("TRANSLATE_API_KEY").ok();
        let timeout = std::env::var("HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults::HTTP_TIMEOUT_SECS);

        Self::new(base_url, api_key, timeout)
    }
}

#[async_trait]
impl TranslationBackend for LibreTranslateBackend {
    #[instrument(skip(self, text), fields(
        subsystem = "translate",
        component = "libretranslate",
        op = "translate",
        language = %target,
        text_len = text.len(),
    ))]
    async fn translate(&self, text: &str, source: Language, target: Language) -> Result<String> {
        let start = Instant::now();
        let request = TranslateRequest {
            q: text,
            source: source.code(),
            target: target.code(),
            format: "text",
            api_key: self.api_key.as_deref(),
        };

        let response = self
            .client
            .post(format!("{}/translate", self.base_url))
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<ErrorResponse>(&body)
                .map(|e| e.error)
                .unwrap_or(body);
            warn!(status = status.as_u16(), error = %detail, "Translation backend failed");
            return Err(Error::Upstream(format!(
                "translation backend returned {}: {}",
                status, detail
            )));
        }

        let result: TranslateResponse = response.json().await?;
        debug!(
            duration_ms = start.elapsed().as_millis() as u64,
            "Translation complete"
        );
        Ok(result.translated_text)
    }

    fn name(&self) -> &str {
        "libretranslate"
    }
}
