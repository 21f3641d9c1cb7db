//! Property search HTTP handler.
//!
//! `GET /api/properties/search` takes the raw filter as query-string values
//! (`location`, `propertyType`, `status`, `minPrice`, `maxPrice`, `beds`,
//! `page`, `limit`). Unlike the other endpoints, failures keep the success
//! envelope so list views can render an empty page with the message.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::debug;

use estate_core::{Listing, ListingFilter, RawSearchParams, SearchResults};

use crate::AppState;

/// One page of matching listings.
#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub success: bool,
    /// Listings on this page, newest first.
    #[schema(value_type = Vec<Object>)]
    pub properties: Vec<Listing>,
    /// Listings matching the filter across all pages.
    pub total: u64,
    pub has_more: bool,
    /// Canonical filter that was searched.
    #[schema(value_type = Object)]
    pub filters: ListingFilter,
    pub page: u32,
    pub limit: u32,
}

impl From<SearchResults> for SearchResponse {
    fn from(results: SearchResults) -> Self {
        Self {
            success: true,
            properties: results.listings,
            total: results.total,
            has_more: results.has_more,
            filters: results.applied_filters,
            page: results.pagination.page(),
            limit: results.pagination.limit(),
        }
    }
}

/// Failed search, still shaped like an (empty) page.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct SearchFailure {
    pub success: bool,
    pub error: String,
    #[schema(value_type = Vec<Object>)]
    pub properties: Vec<Listing>,
    pub total: u64,
}

impl SearchFailure {
    fn respond(status: StatusCode, error: String) -> Response {
        let body = Self {
            success: false,
            error,
            properties: Vec::new(),
            total: 0,
        };
        (status, Json(body)).into_response()
    }
}

/// Search listings.
///
/// # Returns
/// - 200 OK with a page of listings
/// - 400 Bad Request if the filter is invalid (e.g. minPrice above maxPrice)
///   or the query string cannot be read (e.g. a repeated key)
/// - 500 Internal Server Error if the content store fails
#[utoipa::path(get, path = "/api/properties/search", tag = "Search",
    params(
        ("location" = Option<String>, Query, description = "Substring of city or region"),
        ("propertyType" = Option<String>, Query, description = "Exact property type"),
        ("status" = Option<String>, Query, description = "for-sale, for-rent, sold or rented"),
        ("minPrice" = Option<String>, Query, description = "Inclusive lower price bound"),
        ("maxPrice" = Option<String>, Query, description = "Inclusive upper price bound"),
        ("beds" = Option<String>, Query, description = "Exact bedroom count, or 5+"),
        ("page" = Option<String>, Query, description = "Page number (default 1)"),
        ("limit" = Option<String>, Query, description = "Page size, 1-100 (default 12)"),
    ),
    responses(
        (status = 200, description = "Search results", body = SearchResponse),
        (status = 400, description = "Invalid filter", body = SearchFailure),
        (status = 500, description = "Content store failure", body = SearchFailure),
    )
)]
pub async fn search_properties(
    State(state): State<AppState>,
    query: Result<Query<RawSearchParams>, QueryRejection>,
) -> Response {
    let raw = match query {
        Ok(Query(raw)) => raw,
        Err(rejection) => {
            debug!(error = %rejection.body_text(), "Search query string rejected");
            return SearchFailure::respond(StatusCode::BAD_REQUEST, rejection.body_text());
        }
    };

    match state.search.search(&raw).await {
        Ok(results) => Json(SearchResponse::from(results)).into_response(),
        Err(e) => {
            let status = if e.is_client_error() {
                StatusCode::BAD_REQUEST
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            };
            SearchFailure::respond(status, e.to_string())
        }
    }
}
