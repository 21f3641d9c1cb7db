//! HTTP client of the translation endpoint (`POST /api/translate`).
//!
//! Used by calling-side code that sits in front of the server, usually
//! wrapped in a [`CachedTranslator`](crate::CachedTranslator).

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use estate_core::{Error, Language, Result, Translated, Translator};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TranslateRequest<'a> {
    text: &'a str,
    target_language: &'a str,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
}

/// Translator that calls a remote estate-search server.
pub struct ApiTranslator {
    client: Client,
    base_url: String,
}

impl ApiTranslator {
    pub fn new(base_url: impl Into<String>, timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| Error::Config(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl Translator for ApiTranslator {
    #[instrument(skip(self, text), fields(
        subsystem = "translate",
        component = "api_client",
        op = "translate",
        language = %target,
    ))]
    async fn translate(&self, text: &str, target: Language) -> Result<Translated> {
        let response = self
            .client
            .post(format!("{}/api/translate", self.base_url))
            .json(&TranslateRequest {
                text,
                target_language: target.code(),
            })
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }

        let body = response.text().await.unwrap_or_default();
        let detail = serde_json::from_str::<ErrorResponse>(&body)
            .map(|e| e.error)
            .unwrap_or(body);
        if status.is_client_error() {
            Err(Error::Validation(detail))
        } else {
            Err(Error::Upstream(format!(
                "translation endpoint returned {}: {}",
                status, detail
            )))
        }
    }
}
