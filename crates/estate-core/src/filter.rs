//! Property search filter: raw query input and its validated, canonical form.
//!
//! `RawSearchParams` mirrors the query string of the search endpoint and keeps
//! every value as untrusted text. `ListingFilter::from_raw` turns it into the
//! canonical record consumed by the query builder, or rejects it with
//! `Error::Validation`.
//!
//! # Rules
//!
//! - Text fields are trimmed; empty text is treated as absent.
//! - `*` is removed from `location` before that check, so the echoed filter is
//!   exactly the substring searched and a wildcard-only location is absent.
//! - A numeric field whose key is present but does not parse as a finite,
//!   non-negative number is an error. Absent keys are simply omitted.
//! - `minPrice > maxPrice` is rejected, never swapped or clamped.
//! - An all-absent filter is valid and matches every listing.

use serde::{Deserialize, Serialize, Serializer};

use crate::defaults;
use crate::error::{Error, Result};
use crate::models::ListingStatus;

/// Untrusted search input, typically deserialized from a URL query string.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSearchParams {
    pub location: Option<String>,
    pub property_type: Option<String>,
    pub status: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub beds: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

/// Bedroom constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BedsFilter {
    /// Exactly this many bedrooms.
    Exactly(u32),
    /// The "5+" sentinel: five bedrooms or more.
    AtLeastFive,
}

impl BedsFilter {
    /// Parse `"3"` or the `"5+"` sentinel.
    pub fn parse(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        if raw == format!("{}+", defaults::BEDS_OR_MORE) {
            return Ok(BedsFilter::AtLeastFive);
        }
        raw.parse::<u32>().map(BedsFilter::Exactly).map_err(|_| {
            Error::Validation(format!(
                "beds must be a whole number or '{}+', got '{}'",
                defaults::BEDS_OR_MORE,
                raw
            ))
        })
    }
}

impl std::fmt::Display for BedsFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BedsFilter::Exactly(n) => write!(f, "{}", n),
            BedsFilter::AtLeastFive => write!(f, "{}+", defaults::BEDS_OR_MORE),
        }
    }
}

impl Serialize for BedsFilter {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Canonical, validated search criteria.
///
/// Immutable once built: the query builder and the response echo both read
/// the same record.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ListingStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub beds: Option<BedsFilter>,
}

impl ListingFilter {
    /// Validate raw input into a canonical filter.
    pub fn from_raw(raw: &RawSearchParams) -> Result<Self> {
        let min_price = parse_price("minPrice", raw.min_price.as_deref())?;
        let max_price = parse_price("maxPrice", raw.max_price.as_deref())?;

        if let (Some(min), Some(max)) = (min_price, max_price) {
            if min > max {
                return Err(Error::Validation(format!(
                    "invalid price range: minPrice ({}) is greater than maxPrice ({})",
                    min, max
                )));
            }
        }

        let status = match non_empty(raw.status.as_deref()) {
            Some(value) => Some(ListingStatus::parse(&value).ok_or_else(|| {
                let valid: Vec<&str> = ListingStatus::ALL.iter().map(|s| s.as_str()).collect();
                Error::Validation(format!(
                    "unknown status '{}'. Valid values: {}",
                    value,
                    valid.join(", ")
                ))
            })?),
            None => None,
        };

        let beds = non_empty(raw.beds.as_deref())
            .map(|value| BedsFilter::parse(&value))
            .transpose()?;

        Ok(Self {
            location: raw
                .location
                .as_deref()
                .map(strip_wildcards)
                .and_then(|v| non_empty(Some(v.as_str()))),
            property_type: non_empty(raw.property_type.as_deref()),
            status,
            min_price,
            max_price,
            beds,
        })
    }

    /// True when no field constrains the search.
    pub fn is_empty(&self) -> bool {
        self.active_count() == 0
    }

    /// Number of fields that constrain the search.
    pub fn active_count(&self) -> usize {
        [
            self.location.is_some(),
            self.property_type.is_some(),
            self.status.is_some(),
            self.min_price.is_some(),
            self.max_price.is_some(),
            self.beds.is_some(),
        ]
        .into_iter()
        .filter(|active| *active)
        .count()
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Remove `match` wildcard characters so the operand is a literal substring.
fn strip_wildcards(text: &str) -> String {
    text.chars().filter(|c| *c != '*').collect()
}

fn parse_price(field: &str, raw: Option<&str>) -> Result<Option<f64>> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    let value: f64 = trimmed.parse().map_err(|_| {
        Error::Validation(format!("{} must be a number, got '{}'", field, trimmed))
    })?;
    if !value.is_finite() {
        return Err(Error::Validation(format!(
            "{} must be a finite number, got '{}'",
            field, trimmed
        )));
    }
    if value < 0.0 {
        return Err(Error::Validation(format!(
            "{} must not be negative, got {}",
            field, value
        )));
    }
    Ok(Some(value))
}
