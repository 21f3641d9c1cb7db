//! Exchange-rate source backed by an open.er-api.com compatible service.
//!
//! `GET {base_url}/latest/{BASE}` returns:
//!
//! ```json
//! {
//!   "result": "success",
//!   "base_code": "EUR",
//!   "time_last_update_unix": 1714521600,
//!   "rates": { "EUR": 1, "USD": 1.0801, "GBP": 0.8563 }
//! }
//! ```
//!
//! Tables are always requested for [`defaults::BASE_CURRENCY`], the currency
//! listing prices are stored in, so conversions and the fallback table share
//! one base.
//!
//! Environment variables:
//! - `RATES_BASE_URL` (default: https://open.er-api.com/v6)
//! - `HTTP_TIMEOUT_SECS` (default: 15)

use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use estate_core::{defaults, normalize_currency, Error, RateSource, RateTable, Result};

#[derive(Debug, Deserialize)]
struct LatestResponse {
    result: String,
    #[serde(default)]
    base_code: Option<String>,
    #[serde(default)]
    time_last_update_unix: Option<i64>,
    #[serde(default)]
    rates: HashMap<String, f64>,
    #[serde(rename = "error-type", default)]
    error_type: Option<String>,
}

/// HTTP rate source.
pub struct HttpRateSource {
    client: Client,
    base_url: String,
    base_currency: String,
}

impl HttpRateSource {
    pub fn new(base_url: impl Into<String>, timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| Error::Config(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            base_currency: defaults::BASE_CURRENCY.to_string(),
        })
    }

    pub fn from_env() -> Result<Self> {
        let base_url =
            std::env::var("RATES_BASE_URL").unwrap_or_else(|_| defaults::RATES_URL.to_string());
        let timeout = std::env::var("HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults::HTTP_TIMEOUT_SECS);

        Self::new(base_url, timeout)
    }

    pub fn base_currency(&self) -> &str {
        &self.base_currency
    }
}

#[async_trait]
impl RateSource for HttpRateSource {
    #[instrument(skip(self), fields(
        subsystem = "rates",
        component = "http_rate_source",
        op = "fetch_rates",
        currency = %self.base_currency,
    ))]
    async fn fetch_rates(&self) -> Result<RateTable> {
        let start = Instant::now();
        let url = format!("{}/latest/{}", self.base_url, self.base_currency);

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "Rate source returned an error status");
            return Err(Error::Upstream(format!(
                "rate source returned {}: {}",
                status, body
            )));
        }

        let latest: LatestResponse = response.json().await?;
        if latest.result != "success" {
            return Err(Error::Upstream(format!(
                "rate source reported {}",
                latest.error_type.as_deref().unwrap_or("an unknown error")
            )));
        }

        let base = latest.base_code.as_deref().unwrap_or(&self.base_currency);
        if normalize_currency(base) != self.base_currency {
            return Err(Error::Upstream(format!(
                "rate source answered for base {} instead of {}",
                base, self.base_currency
            )));
        }

        let updated_at = latest
            .time_last_update_unix
            .and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0))
            .unwrap_or_else(Utc::now);
        let table = RateTable::new(&self.base_currency, latest.rates, updated_at);

        debug!(
            result_count = table.rates.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Rate table fetched"
        );
        Ok(table)
    }

    fn name(&self) -> &str {
        "open-er-api"
    }
}
