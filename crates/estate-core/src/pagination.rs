//! Page/limit handling for search requests.
//!
//! Caller-supplied values are clamped, never rejected: a page below 1 becomes
//! 1, a limit outside `[1, 100]` is pulled to the nearest bound, and values
//! that are not whole numbers fall back to the defaults.

use serde::{Deserialize, Serialize};

use crate::defaults;

/// A clamped pagination request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pagination {
    page: u32,
    limit: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: defaults::PAGE,
            limit: defaults::PAGE_LIMIT,
        }
    }
}

impl Pagination {
    /// Build a pagination request, clamping both values into range.
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page: page.max(1),
            limit: limit.clamp(defaults::PAGE_LIMIT_MIN, defaults::PAGE_LIMIT_MAX),
        }
    }

    /// Parse raw query-string values.
    pub fn from_raw(page: Option<&str>, limit: Option<&str>) -> Self {
        let page = parse_whole(page)
            .map(|p| p.clamp(1.0, u32::MAX as f64) as u32)
            .unwrap_or(defaults::PAGE);

        let limit = parse_whole(limit)
            .map(|l| {
                l.clamp(
                    defaults::PAGE_LIMIT_MIN as f64,
                    defaults::PAGE_LIMIT_MAX as f64,
                ) as u32
            })
            .unwrap_or(defaults::PAGE_LIMIT);

        Self::new(page, limit)
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Number of listings skipped before this page.
    pub fn offset(&self) -> u64 {
        (self.page as u64 - 1) * self.limit as u64
    }

    /// Exclusive end of this page's window.
    pub fn end(&self) -> u64 {
        self.offset() + self.limit as u64
    }

    /// Whether listings exist beyond this page, given the total match count.
    pub fn has_more(&self, total: u64) -> bool {
        total > self.page as u64 * self.limit as u64
    }
}

/// Parse a whole number; fractional, non-finite and garbage values are `None`.
fn parse_whole(raw: Option<&str>) -> Option<f64> {
    let value: f64 = raw?.trim().parse().ok()?;
    if value.is_finite() && value.fract() == 0.0 {
        Some(value)
    } else {
        None
    }
}
