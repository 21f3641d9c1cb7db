//! Bounded in-memory cache with per-entry expiry.
//!
//! Entries are usable only while `now < expires_at`; an expired entry is
//! removed on lookup and reported as a miss, never served stale. Capacity is
//! bounded by LRU eviction. Time comes from `tokio::time`, so tests can pause
//! and advance the clock.

use std::hash::Hash;
use std::num::NonZeroUsize;
use std::time::Duration;

use lru::LruCache;
use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::defaults;

/// A cached value with its validity window.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    pub value: V,
    pub created_at: Instant,
    pub expires_at: Instant,
}

impl<V> CacheEntry<V> {
    pub fn is_live(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

/// Hit/miss counters for monitoring.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

pub struct TtlCache<K: Hash + Eq, V> {
    inner: Mutex<Inner<K, V>>,
    ttl: Duration,
}

struct Inner<K: Hash + Eq, V> {
    entries: LruCache<K, CacheEntry<V>>,
    hits: u64,
    misses: u64,
}

impl<K: Hash + Eq, V: Clone> TtlCache<K, V> {
    /// Create a cache holding at most `capacity` entries for `ttl` each.
    /// A zero capacity is treated as one; `ttl` is capped at
    /// [`defaults::MAX_CACHE_TTL_SECS`] so expiry instants cannot overflow.
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        let ttl = ttl.min(Duration::from_secs(defaults::MAX_CACHE_TTL_SECS));
        Self {
            inner: Mutex::new(Inner {
                entries: LruCache::new(capacity),
                hits: 0,
                misses: 0,
            }),
            ttl,
        }
    }

    /// Look up a live entry, dropping it if it has expired.
    pub async fn get(&self, key: &K) -> Option<V> {
        let now = Instant::now();
        let mut inner = self.inner.lock().await;

        let found = inner
            .entries
            .get(key)
            .map(|entry| (entry.is_live(now), entry.value.clone()));
        let live = match found {
            Some((true, value)) => Some(value),
            Some((false, _)) => {
                inner.entries.pop(key);
                None
            }
            None => None,
        };

        if live.is_some() {
            inner.hits += 1;
        } else {
            inner.misses += 1;
        }
        live
    }

    /// Insert or replace an entry, valid for this cache's TTL from now.
    pub async fn insert(&self, key: K, value: V) {
        let created_at = Instant::now();
        let entry = CacheEntry {
            value,
            created_at,
            expires_at: created_at + self.ttl,
        };
        self.inner.lock().await.entries.put(key, entry);
    }

    /// Number of stored entries, including ones not yet purged after expiry.
    pub async fn len(&self) -> usize {
        self.inner.lock().await.entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    pub async fn clear(&self) {
        self.inner.lock().await.entries.clear();
    }

    pub async fn stats(&self) -> CacheStats {
        let inner = self.inner.lock().await;
        CacheStats {
            hits: inner.hits,
            misses: inner.misses,
            entries: inner.entries.len(),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_hit_within_ttl() {
        let cache = TtlCache::new(10, Duration::from_secs(60));
        cache.insert("k", 1).await;

        tokio::time::advance(Duration::from_secs(59)).await;
        assert_eq!(cache.get(&"k").await, Some(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_expired_entry_is_absent_and_purged() {
        let cache = TtlCache::new(10, Duration::from_secs(60));
        cache.insert("k", 1).await;

        tokio::time::advance(Duration::from_secs(60)).await;
        assert_eq!(cache.get(&"k").await, None);
        assert_eq!(cache.len().await, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reinsert_restarts_ttl() {
        let cache = TtlCache::new(10, Duration::from_secs(60));
        cache.insert("k", 1).await;
        tokio::time::advance(Duration::from_secs(45)).await;
        cache.insert("k", 2).await;
        tokio::time::advance(Duration::from_secs(45)).await;

        assert_eq!(cache.get(&"k").await, Some(2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_oversized_ttl_is_capped() {
        let cache = TtlCache::new(10, Duration::from_secs(u64::MAX));
        cache.insert("k", 1).await;

        let max = Duration::from_secs(defaults::MAX_CACHE_TTL_SECS);
        tokio::time::advance(max - Duration::from_secs(1)).await;
        assert_eq!(cache.get(&"k").await, Some(1));
        tokio::time::advance(Duration::from_secs(1)).await;
        assert_eq!(cache.get(&"k").await, None);
    }

    #[tokio::test]
    async fn test_capacity_evicts_least_recently_used() {
        let cache = TtlCache::new(2, Duration::from_secs(60));
        cache.insert("a", 1).await;
        cache.insert("b", 2).await;
        assert_eq!(cache.get(&"a").await, Some(1));
        cache.insert("c", 3).await;

        assert_eq!(cache.get(&"b").await, None);
        assert_eq!(cache.get(&"a").await, Some(1));
        assert_eq!(cache.get(&"c").await, Some(3));
    }

    #[tokio::test]
    async fn test_stats_count_hits_and_misses() {
        let cache = TtlCache::new(4, Duration::from_secs(60));
        cache.insert("a", 1).await;
        cache.get(&"a").await;
        cache.get(&"missing").await;

        let stats = cache.stats().await;
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.entries, 1);
    }

    #[tokio::test]
    async fn test_zero_capacity_treated_as_one() {
        let cache = TtlCache::new(0, Duration::from_secs(60));
        cache.insert("a", 1).await;
        assert_eq!(cache.get(&"a").await, Some(1));
    }
}
