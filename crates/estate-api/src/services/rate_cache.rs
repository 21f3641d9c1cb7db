//! Currency rate cache.
//!
//! Holds the current [`RateTable`] as a shared `Arc` that is replaced as a
//! whole on every successful fetch. Readers never observe a partially
//! updated table.
//!
//! ## Failure policy
//!
//! - First fetch fails: the pinned fallback table is installed and flagged.
//! - Later refresh fails: the previous table stays in place.
//!
//! ## Configuration
//!
//! Environment variables:
//! - `RATES_REFRESH_SECS`: background refresh interval (default: 3600)

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

use estate_core::{defaults, format_price, RateSource, RateTable, Result};

/// Shared exchange-rate table with lazy loading and background refresh.
pub struct RateCache {
    source: Arc<dyn RateSource>,
    table: RwLock<Option<Arc<RateTable>>>,
}

impl RateCache {
    pub fn new(source: Arc<dyn RateSource>) -> Self {
        Self {
            source,
            table: RwLock::new(None),
        }
    }

    /// Current table without triggering a fetch.
    pub async fn current(&self) -> Option<Arc<RateTable>> {
        self.table.read().await.clone()
    }

    /// Current table, fetching it on first use.
    pub async fn table(&self) -> Arc<RateTable> {
        if let Some(table) = self.current().await {
            return table;
        }
        self.refresh().await
    }

    /// Fetch a fresh table and swap it in.
    ///
    /// Never fails: on error the previous table is kept, or the fallback
    /// table installed if there is none yet.
    #[instrument(skip(self), fields(
        subsystem = "rates",
        component = "rate_cache",
        op = "refresh",
        source = %self.source.name(),
    ))]
    pub async fn refresh(&self) -> Arc<RateTable> {
        let start = Instant::now();
        // The lock is not held across the fetch.
        let fetched = self.source.fetch_rates().await;

        let mut slot = self.table.write().await;
        match fetched {
            Ok(table) => {
                let table = Arc::new(table);
                *slot = Some(table.clone());
                info!(
                    currency = %table.base,
                    result_count = table.rates.len(),
                    duration_ms = start.elapsed().as_millis() as u64,
                    "Rate table refreshed"
                );
                table
            }
            Err(e) => match slot.as_ref() {
                Some(previous) => {
                    warn!(error = %e, "Rate refresh failed, keeping previous table");
                    previous.clone()
                }
                None => {
                    warn!(error = %e, fallback = true, "Rate fetch failed, using fallback rates");
                    let table = Arc::new(RateTable::fallback());
                    *slot = Some(table.clone());
                    table
                }
            },
        }
    }

    /// Convert an amount from the base currency. Unknown targets use factor 1.
    pub async fn convert(&self, amount: f64, target: &str) -> f64 {
        self.table().await.convert(amount, target)
    }

    /// Convert between two supported currencies.
    pub async fn convert_between(&self, amount: f64, from: &str, to: &str) -> Result<f64> {
        self.table().await.convert_between(amount, from, to)
    }

    /// Convert from the base currency and render for display.
    pub async fn format(&self, amount: f64, target: &str) -> String {
        let table = self.table().await;
        let currency = if table.factor(target).is_some() {
            target
        } else {
            table.base.as_str()
        };
        format_price(table.convert(amount, target), currency)
    }

    /// Refresh on a fixed interval until the returned handle is dropped or
    /// stopped. The interval is clamped to the accepted refresh bounds.
    pub fn spawn_refresh(self: &Arc<Self>, interval: Duration) -> RefreshHandle {
        let interval = interval.clamp(
            Duration::from_secs(defaults::MIN_RATES_REFRESH_SECS),
            Duration::from_secs(defaults::MAX_RATES_REFRESH_SECS),
        );
        let cache = Arc::clone(self);
        let task = tokio::spawn(async move {
            let start = tokio::time::Instant::now() + interval;
            let mut ticker = tokio::time::interval_at(start, interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                debug!(subsystem = "rates", component = "rate_cache", "Scheduled rate refresh");
                cache.refresh().await;
            }
        });
        RefreshHandle { task }
    }
}

/// Stops the background refresh when dropped.
#[derive(Debug)]
pub struct RefreshHandle {
    task: JoinHandle<()>,
}

impl RefreshHandle {
    /// Stop the background refresh now.
    pub fn stop(self) {
        self.task.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for RefreshHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}
