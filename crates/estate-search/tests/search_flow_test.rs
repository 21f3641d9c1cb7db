//! End-to-end search flows over an in-memory content store.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use estate_core::{Listing, RawSearchParams, Result};
use estate_search::{SearchSequencer, SearchService};
use estate_store::test_fixtures::{kassandra_villa, thessaloniki_flat};
use estate_store::{CompiledQuery, ContentStore, InMemoryStore, QueryParam};

/// Store whose latency depends on the location being searched.
struct SlowStore {
    inner: InMemoryStore,
}

impl SlowStore {
    fn delay(query: &CompiledQuery) -> Duration {
        match query.param("location") {
            Some(QueryParam::Pattern(text)) if text == "Kassandra" => Duration::from_millis(500),
            _ => Duration::from_millis(50),
        }
    }
}

#[async_trait]
impl ContentStore for SlowStore {
    async fn fetch_listings(&self, query: &CompiledQuery) -> Result<Vec<Listing>> {
        tokio::time::sleep(Self::delay(query)).await;
        self.inner.fetch_listings(query).await
    }

    async fn count_listings(&self, query: &CompiledQuery) -> Result<u64> {
        tokio::time::sleep(Self::delay(query)).await;
        self.inner.count_listings(query).await
    }

    fn name(&self) -> &str {
        "slow"
    }
}

fn location(text: &str) -> RawSearchParams {
    RawSearchParams {
        location: Some(text.to_string()),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_results_serialize_with_applied_filters() {
    let store = Arc::new(InMemoryStore::new(vec![kassandra_villa(), thessaloniki_flat()]));
    let service = SearchService::new(store);

    let raw = RawSearchParams {
        location: Some("  Kassandra ".to_string()),
        property_type: Some("".to_string()),
        beds: Some("3".to_string()),
        limit: Some("500".to_string()),
        ..Default::default()
    };
    let results = service.search(&raw).await.unwrap();
    let json = serde_json::to_value(&results).unwrap();

    assert_eq!(json["total"], 1);
    assert_eq!(json["hasMore"], false);
    assert_eq!(json["appliedFilters"]["location"], "Kassandra");
    assert_eq!(json["appliedFilters"]["beds"], "3");
    assert!(json["appliedFilters"].get("propertyType").is_none());
    assert_eq!(json["pagination"]["limit"], 100);
}

#[tokio::test(start_paused = true)]
async fn test_stale_response_is_discarded() {
    let store = Arc::new(SlowStore {
        inner: InMemoryStore::new(vec![kassandra_villa(), thessaloniki_flat()]),
    });
    let service = SearchService::new(store);
    let sequencer = Arc::new(SearchSequencer::new());
    let shown: Arc<std::sync::Mutex<Vec<String>>> = Arc::default();

    // The slow Kassandra search is issued first, the fast one second.
    let mut tasks = Vec::new();
    for text in ["Kassandra", "Thessaloniki"] {
        let token = sequencer.issue();
        let service = service.clone();
        let sequencer = sequencer.clone();
        let shown = shown.clone();
        tasks.push(tokio::spawn(async move {
            let results = service.search(&location(text)).await.unwrap();
            sequencer.apply_if_current(token, results, |page| {
                let ids = page.listings.into_iter().map(|l| l.id);
                shown.lock().unwrap().extend(ids);
            })
        }));
    }

    let mut applied = Vec::new();
    for task in tasks {
        applied.push(task.await.unwrap().is_some());
    }

    assert_eq!(applied, vec![false, true]);
    assert_eq!(*shown.lock().unwrap(), vec!["prop-thessaloniki-1".to_string()]);
}

#[tokio::test]
async fn test_wildcard_location_echoes_what_was_searched() {
    let store = Arc::new(InMemoryStore::new(vec![kassandra_villa(), thessaloniki_flat()]));
    let service = SearchService::new(store);

    let results = service.search(&location("***")).await.unwrap();
    assert_eq!(results.total, 2);
    assert_eq!(results.applied_filters.location, None);

    let results = service.search(&location("Kass*andra")).await.unwrap();
    assert_eq!(results.total, 1);
    assert_eq!(results.applied_filters.location.as_deref(), Some("Kassandra"));
}
