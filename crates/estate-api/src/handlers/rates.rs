//! Exchange-rate HTTP handlers.

use std::collections::BTreeMap;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{ApiError, AppState};

/// Current conversion factors relative to `base`.
#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RatesResponse {
    pub base: String,
    pub rates: BTreeMap<String, f64>,
    pub updated_at: DateTime<Utc>,
    /// True when the live source was unavailable and pinned rates are served.
    pub fallback: bool,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct ConvertRequest {
    pub amount: f64,
    pub from: String,
    pub to: String,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ConvertResponse {
    /// Converted amount in `to`.
    pub amount: f64,
    pub to: String,
    pub from: String,
}

/// Get the current rate table.
#[utoipa::path(get, path = "/api/rates", tag = "Currency",
    responses((status = 200, description = "Rate table", body = RatesResponse)))]
pub async fn get_rates(State(state): State<AppState>) -> Json<RatesResponse> {
    let table = state.rates.table().await;
    Json(RatesResponse {
        base: table.base.clone(),
        rates: table.rates.clone(),
        updated_at: table.updated_at,
        fallback: table.fallback,
    })
}

/// Convert an amount between two supported currencies.
///
/// # Returns
/// - 200 OK with the converted amount
/// - 400 Bad Request for unsupported codes (message lists the valid ones)
///   a non-finite amount, or a malformed body
#[utoipa::path(post, path = "/api/rates", tag = "Currency",
    request_body = ConvertRequest,
    responses(
        (status = 200, description = "Converted amount", body = ConvertResponse),
        (status = 400, description = "Unsupported currency"),
    )
)]
pub async fn convert(
    State(state): State<AppState>,
    payload: Result<Json<ConvertRequest>, JsonRejection>,
) -> Result<Json<ConvertResponse>, ApiError> {
    let Json(req) = payload?;
    if !req.amount.is_finite() {
        return Err(ApiError::BadRequest("amount must be a finite number".into()));
    }
    let amount = state
        .rates
        .convert_between(req.amount, &req.from, &req.to)
        .await?;

    Ok(Json(ConvertResponse {
        amount,
        to: estate_core::normalize_currency(&req.to),
        from: estate_core::normalize_currency(&req.from),
    }))
}
