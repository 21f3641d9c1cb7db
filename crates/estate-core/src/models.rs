//! Listing projection and search result types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::filter::ListingFilter;
use crate::pagination::Pagination;

/// Marketing status of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ListingStatus {
    ForSale,
    ForRent,
    Sold,
    Rented,
}

impl ListingStatus {
    pub const ALL: [ListingStatus; 4] = [
        ListingStatus::ForSale,
        ListingStatus::ForRent,
        ListingStatus::Sold,
        ListingStatus::Rented,
    ];

    /// Wire value stored in the content store.
    pub fn as_str(&self) -> &'static str {
        match self {
            ListingStatus::ForSale => "for-sale",
            ListingStatus::ForRent => "for-rent",
            ListingStatus::Sold => "sold",
            ListingStatus::Rented => "rented",
        }
    }

    /// Parse a wire value (case-insensitive, surrounding whitespace ignored).
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(value))
    }
}

impl std::fmt::Display for ListingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Postal address of a listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Address {
    #[serde(default)]
    pub street: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

/// Read-only listing projection returned by the content store.
///
/// Listings are owned by the content store; the search pipeline only reads
/// snapshots of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub slug: Option<String>,
    /// Price in the currency of record (EUR), whole units.
    pub price: f64,
    #[serde(default)]
    pub property_type: Option<String>,
    #[serde(default)]
    pub status: Option<ListingStatus>,
    #[serde(default)]
    pub bedrooms: Option<u32>,
    #[serde(default)]
    pub bathrooms: Option<u32>,
    /// Living area in square meters.
    #[serde(default)]
    pub area: Option<f64>,
    #[serde(default)]
    pub address: Address,
    /// Asset reference of the primary image.
    #[serde(default)]
    pub main_image: Option<String>,
    /// Reference to the listing agent document.
    #[serde(default)]
    pub agent: Option<String>,
    pub published_at: DateTime<Utc>,
}

/// One page of search results.
///
/// `has_more` is computed from the count query at query time; a later
/// search may compute it differently if listings change in between.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResults {
    pub listings: Vec<Listing>,
    pub total: u64,
    pub has_more: bool,
    /// Canonical filter that was actually searched.
    pub applied_filters: ListingFilter,
    pub pagination: Pagination,
}

impl SearchResults {
    pub fn new(
        listings: Vec<Listing>,
        total: u64,
        applied_filters: ListingFilter,
        pagination: Pagination,
    ) -> Self {
        let has_more = pagination.has_more(total);
        Self {
            listings,
            total,
            has_more,
            applied_filters,
            pagination,
        }
    }
}
