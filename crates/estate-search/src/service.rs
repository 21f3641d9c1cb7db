//! Property search service.
//!
//! Orchestrates one search request: clamp pagination, validate the filter,
//! compile the query pair, run the listing and count queries concurrently,
//! and assemble a [`SearchResults`] page.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, instrument, warn, Span};

use estate_core::{logging, ListingFilter, Pagination, RawSearchParams, Result, SearchResults};
use estate_store::{ContentStore, ListingQueryBuilder};

/// Read-only, idempotent property search over a [`ContentStore`].
#[derive(Clone)]
pub struct SearchService {
    store: Arc<dyn ContentStore>,
}

impl SearchService {
    pub fn new(store: Arc<dyn ContentStore>) -> Self {
        Self { store }
    }

    pub fn store_name(&self) -> &str {
        self.store.name()
    }

    /// Run a search from untrusted request parameters.
    ///
    /// Invalid filters fail with a validation error before the content store
    /// is contacted. Store failures are returned as upstream errors; nothing
    /// is retried.
    #[instrument(skip(self, raw), fields(
        subsystem = "search",
        component = "search_service",
        op = "search",
        store = %self.store.name(),
        page = tracing::field::Empty,
        limit = tracing::field::Empty,
        filter_count = tracing::field::Empty,
        total = tracing::field::Empty,
    ))]
    pub async fn search(&self, raw: &RawSearchParams) -> Result<SearchResults> {
        let start = Instant::now();
        let span = Span::current();

        let pagination = Pagination::from_raw(raw.page.as_deref(), raw.limit.as_deref());
        span.record(logging::PAGE, pagination.page());
        span.record(logging::LIMIT, pagination.limit());

        let filter = ListingFilter::from_raw(raw).map_err(|e| {
            debug!(error = %e, "Rejected search filter");
            e
        })?;
        span.record(logging::FILTER_COUNT, filter.active_count() as u64);

        let query = ListingQueryBuilder::new(&filter, pagination).build();
        tracing::trace!(listing_query = %query.listing_query, "Compiled listing query");

        let (listings, total) = tokio::try_join!(
            self.store.fetch_listings(&query),
            self.store.count_listings(&query),
        )
        .map_err(|e| {
            warn!(error = %e, "Content store query failed");
            e
        })?;
        span.record(logging::TOTAL, total);

        let results = SearchResults::new(listings, total, filter, pagination);
        info!(
            result_count = results.listings.len(),
            has_more = results.has_more,
            duration_ms = start.elapsed().as_millis() as u64,
            "Property search completed"
        );
        Ok(results)
    }
}
