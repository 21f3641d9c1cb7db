//! In-memory content store.
//!
//! Evaluates the structured predicates of a [`CompiledQuery`] against a
//! fixed set of listings, applying the same ordering and window the GROQ text
//! describes. Used by tests and by the server when no content store is
//! configured.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use tracing::{debug, trace};

use estate_core::{Error, Listing, Result};

use crate::query_builder::{fields, CompiledQuery, Predicate, QueryParam};
use crate::store::ContentStore;

/// Content store holding listings in memory.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    listings: Vec<Listing>,
    fail: AtomicBool,
    queries: AtomicUsize,
}

impl InMemoryStore {
    pub fn new(listings: Vec<Listing>) -> Self {
        Self {
            listings,
            fail: AtomicBool::new(false),
            queries: AtomicUsize::new(0),
        }
    }

    /// Make every subsequent query fail with an upstream error.
    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    /// Number of queries (listing or count) received so far.
    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    fn begin(&self) -> Result<()> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(Error::Upstream("content store unavailable".to_string()));
        }
        Ok(())
    }

    /// All matching listings, newest first.
    fn matching(&self, query: &CompiledQuery) -> Vec<&Listing> {
        let mut matched: Vec<&Listing> = self
            .listings
            .iter()
            .filter(|listing| {
                query
                    .predicates
                    .iter()
                    .all(|predicate| evaluate(predicate, listing, query))
            })
            .collect();
        matched.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        matched
    }
}

#[async_trait]
impl ContentStore for InMemoryStore {
    async fn fetch_listings(&self, query: &CompiledQuery) -> Result<Vec<Listing>> {
        self.begin()?;
        let offset = query.pagination.offset() as usize;
        let limit = query.pagination.limit() as usize;
        let page: Vec<Listing> = self
            .matching(query)
            .into_iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect();
        debug!(
            subsystem = "store",
            component = "memory",
            result_count = page.len(),
            "Listing query complete"
        );
        Ok(page)
    }

    async fn count_listings(&self, query: &CompiledQuery) -> Result<u64> {
        self.begin()?;
        Ok(self.matching(query).len() as u64)
    }

    fn name(&self) -> &str {
        "memory"
    }
}

fn evaluate(predicate: &Predicate, listing: &Listing, query: &CompiledQuery) -> bool {
    let result = match predicate {
        // Every stored listing is a property document.
        Predicate::DocumentType => true,
        Predicate::Matches { fields, param } => match query.param(param) {
            Some(QueryParam::Pattern(needle)) => {
                let needle = needle.to_lowercase();
                fields.iter().any(|field| {
                    text_field(listing, field)
                        .map(|value| value.to_lowercase().contains(&needle))
                        .unwrap_or(false)
                })
            }
            _ => false,
        },
        Predicate::Equals { field, param } => match query.param(param) {
            Some(QueryParam::Text(expected)) => {
                text_field(listing, field).as_deref() == Some(expected.as_str())
            }
            Some(QueryParam::Number(expected)) => numeric_field(listing, field) == Some(*expected),
            Some(QueryParam::Int(expected)) => {
                numeric_field(listing, field) == Some(f64::from(*expected))
            }
            _ => false,
        },
        Predicate::AtLeast { field, param } => compare(listing, field, query.param(param))
            .map(|(value, bound)| value >= bound)
            .unwrap_or(false),
        Predicate::AtMost { field, param } => compare(listing, field, query.param(param))
            .map(|(value, bound)| value <= bound)
            .unwrap_or(false),
    };
    trace!(listing = %listing.id, predicate = %predicate.render(), result, "Predicate evaluated");
    result
}

fn compare(listing: &Listing, field: &str, param: Option<&QueryParam>) -> Option<(f64, f64)> {
    let bound = match param? {
        QueryParam::Number(n) => *n,
        QueryParam::Int(n) => f64::from(*n),
        _ => return None,
    };
    Some((numeric_field(listing, field)?, bound))
}

fn text_field(listing: &Listing, field: &str) -> Option<String> {
    match field {
        fields::CITY => listing.address.city.clone(),
        fields::REGION => listing.address.region.clone(),
        fields::PROPERTY_TYPE => listing.property_type.clone(),
        fields::STATUS => listing.status.map(|s| s.as_str().to_string()),
        _ => None,
    }
}

fn numeric_field(listing: &Listing, field: &str) -> Option<f64> {
    match field {
        fields::PRICE => Some(listing.price),
        fields::BEDROOMS => listing.bedrooms.map(f64::from),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query_builder::ListingQueryBuilder;
    use crate::test_fixtures::{kassandra_villa, listing, thessaloniki_flat};
    use estate_core::{BedsFilter, ListingFilter, ListingStatus, Pagination};

    fn run(filter: &ListingFilter) -> CompiledQuery {
        ListingQueryBuilder::new(filter, Pagination::default()).build()
    }

    #[tokio::test]
    async fn test_location_matches_region_case_insensitive() {
        let store = InMemoryStore::new(vec![kassandra_villa(), thessaloniki_flat()]);
        let filter = ListingFilter {
            location: Some("halkidiki".to_string()),
            ..Default::default()
        };
        let q = run(&filter);

        let found = store.fetch_listings(&q).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "prop-kassandra-1");
        assert_eq!(store.count_listings(&q).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_price_bounds_inclusive() {
        let store = InMemoryStore::new(vec![kassandra_villa(), thessaloniki_flat()]);
        let filter = ListingFilter {
            min_price: Some(250_000.0),
            max_price: Some(250_000.0),
            ..Default::default()
        };
        let found = store.fetch_listings(&run(&filter)).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].price, 250_000.0);
    }

    #[tokio::test]
    async fn test_beds_sentinel_means_five_or_more() {
        let mut big = listing("big", "2024-01-01T00:00:00Z");
        big.bedrooms = Some(6);
        let mut five = listing("five", "2024-01-02T00:00:00Z");
        five.bedrooms = Some(5);
        let mut four = listing("four", "2024-01-03T00:00:00Z");
        four.bedrooms = Some(4);
        let store = InMemoryStore::new(vec![big, five, four]);

        let filter = ListingFilter {
            beds: Some(BedsFilter::AtLeastFive),
            ..Default::default()
        };
        let ids: Vec<String> = store
            .fetch_listings(&run(&filter))
            .await
            .unwrap()
            .into_iter()
            .map(|l| l.id)
            .collect();
        assert_eq!(ids, vec!["five", "big"]);
    }

    #[tokio::test]
    async fn test_status_and_window() {
        let listings: Vec<Listing> = (0..15)
            .map(|i| {
                let mut l = listing(&format!("p{:02}", i), &format!("2024-01-{:02}T00:00:00Z", i + 1));
                l.status = Some(ListingStatus::ForRent);
                l
            })
            .collect();
        let store = InMemoryStore::new(listings);
        let filter = ListingFilter {
            status: Some(ListingStatus::ForRent),
            ..Default::default()
        };

        let second = ListingQueryBuilder::new(&filter, Pagination::new(2, 12)).build();
        let page = store.fetch_listings(&second).await.unwrap();
        assert_eq!(page.len(), 3);
        // Newest first, so the second page holds the oldest three.
        assert_eq!(page[0].id, "p02");
        assert_eq!(store.count_listings(&second).await.unwrap(), 15);
    }

    #[tokio::test]
    async fn test_failing_store_counts_queries() {
        let store = InMemoryStore::new(vec![kassandra_villa()]);
        store.set_failing(true);
        let q = run(&ListingFilter::default());

        let err = store.fetch_listings(&q).await.unwrap_err();
        assert!(matches!(err, Error::Upstream(_)));
        assert_eq!(store.query_count(), 1);
    }
}
