//! In-memory result cache using moka

use std::sync::{Arc, Weak};
use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache as MokaCache;
use serde_json::Value;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::debug;

use crate::domain::cache::{QueryCacheKey, ResultCache};

/// Configuration for the in-memory result cache
#[derive(Debug, Clone)]
pub struct InMemoryCacheConfig {
    /// Time-to-live of every entry, counted from insertion
    pub ttl: Duration,
    /// Period of the background sweep removing expired entries
    pub sweep_interval: Duration,
    /// Maximum number of entries; `None` keeps the cache unbounded
    pub max_capacity: Option<u64>,
}

impl Default for InMemoryCacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(3600),
            sweep_interval: Duration::from_secs(600),
            max_capacity: None,
        }
    }
}

impl InMemoryCacheConfig {
    /// Sets the entry time-to-live
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Sets the sweep period
    pub fn with_sweep_interval(mut self, interval: Duration) -> Self {
        self.sweep_interval = interval;
        self
    }

    /// Bounds the number of entries
    pub fn with_max_capacity(mut self, capacity: u64) -> Self {
        self.max_capacity = Some(capacity);
        self
    }
}

/// Cache entry stored in moka
#[derive(Debug, Clone)]
struct CacheEntry {
    value: Arc<Value>,
    expires_at: Instant,
}

impl CacheEntry {
    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Thread-safe query result cache.
///
/// Expiry is tracked per entry on the tokio clock and checked on every read,
/// so an expired entry is a miss even before the sweep removes it. Without
/// `max_capacity` the cache grows without bound between sweeps.
#[derive(Debug)]
pub struct InMemoryResultCache {
    cache: MokaCache<String, CacheEntry>,
    config: InMemoryCacheConfig,
}

impl InMemoryResultCache {
    /// Creates a cache with default configuration
    pub fn new() -> Self {
        Self::with_config(InMemoryCacheConfig::default())
    }

    /// Creates a cache with the given configuration
    pub fn with_config(config: InMemoryCacheConfig) -> Self {
        let mut builder = MokaCache::builder();

        if let Some(capacity) = config.max_capacity {
            builder = builder.max_capacity(capacity);
        }

        Self {
            cache: builder.build(),
            config,
        }
    }

    /// Starts the periodic sweep.
    ///
    /// The task only holds a weak reference and stops once the cache is
    /// dropped.
    pub fn spawn_sweeper(self: &Arc<Self>) -> JoinHandle<()> {
        let cache: Weak<Self> = Arc::downgrade(self);
        let period = self.config.sweep_interval;

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(Instant::now() + period, period);

            loop {
                ticker.tick().await;

                let Some(cache) = cache.upgrade() else {
                    break;
                };

                let removed = cache.purge_expired().await;

                if removed > 0 {
                    debug!(removed, "Swept expired query results");
                }
            }
        })
    }
}

impl Default for InMemoryResultCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ResultCache for InMemoryResultCache {
    async fn get(&self, key: &QueryCacheKey) -> Option<Arc<Value>> {
        let entry = self.cache.get(key.as_str()).await?;

        // Left for the sweep: a concurrent `set` may already have replaced it
        if entry.is_expired(Instant::now()) {
            return None;
        }

        Some(entry.value)
    }

    async fn set(&self, key: QueryCacheKey, value: Arc<Value>) {
        let entry = CacheEntry {
            value,
            expires_at: Instant::now() + self.config.ttl,
        };

        self.cache.insert(key.into_inner(), entry).await;
    }

    async fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let expired: Vec<Arc<String>> = self
            .cache
            .iter()
            .filter(|(_, entry)| entry.is_expired(now))
            .map(|(key, _)| key)
            .collect();

        for key in &expired {
            self.cache.invalidate(key.as_str()).await;
        }

        self.cache.run_pending_tasks().await;
        expired.len()
    }

    async fn len(&self) -> u64 {
        self.cache.run_pending_tasks().await;
        self.cache.entry_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn key(query: &str) -> QueryCacheKey {
        QueryCacheKey::from_query(query)
    }

    fn bindings(value: &str) -> Arc<Value> {
        Arc::new(json!({
            "head": { "vars": ["item"] },
            "results": { "bindings": [{ "item": { "type": "literal", "value": value } }] }
        }))
    }

    #[tokio::test]
    async fn test_set_and_get() {
        let cache = InMemoryResultCache::new();
        cache.set(key("ASK {}"), bindings("a")).await;

        assert_eq!(cache.get(&key("ASK {}")).await, Some(bindings("a")));
    }

    #[tokio::test]
    async fn test_get_missing() {
        let cache = InMemoryResultCache::new();
        assert!(cache.get(&key("ASK {}")).await.is_none());
    }

    #[tokio::test]
    async fn test_lookup_requires_exact_query() {
        let cache = InMemoryResultCache::new();
        cache.set(key("SELECT * WHERE { ?s ?p ?o }"), bindings("a")).await;

        assert!(cache.get(&key("SELECT * WHERE { ?s ?p ?o } ")).await.is_none());
        assert!(cache.get(&key("select * where { ?s ?p ?o }")).await.is_none());
    }

    #[tokio::test]
    async fn test_set_replaces_value() {
        let cache = InMemoryResultCache::new();
        cache.set(key("ASK {}"), bindings("old")).await;
        cache.set(key("ASK {}"), bindings("new")).await;

        assert_eq!(cache.get(&key("ASK {}")).await, Some(bindings("new")));
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_entry_live_until_ttl() {
        let cache = InMemoryResultCache::new();
        cache.set(key("ASK {}"), bindings("a")).await;

        tokio::time::advance(Duration::from_secs(3599)).await;
        assert!(cache.get(&key("ASK {}")).await.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_entry_expires_at_ttl() {
        let cache = InMemoryResultCache::new();
        cache.set(key("ASK {}"), bindings("a")).await;

        tokio::time::advance(Duration::from_secs(3600)).await;
        assert!(cache.get(&key("ASK {}")).await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_expired_read_keeps_fresh_replacement() {
        let cache = Arc::new(InMemoryResultCache::new());
        cache.set(key("ASK {}"), bindings("a")).await;
        tokio::time::advance(Duration::from_secs(3600)).await;

        // Replacement lands between a reader fetching the stale entry and
        // acting on it
        let read_key = key("ASK {}");
        let (stale, _) = tokio::join!(cache.get(&read_key), async {
            cache.set(key("ASK {}"), bindings("b")).await;
        });
        assert!(stale.is_none() || stale == Some(bindings("b")));

        assert_eq!(cache.get(&key("ASK {}")).await, Some(bindings("b")));
    }

    #[tokio::test(start_paused = true)]
    async fn test_expired_read_leaves_entry_for_sweep() {
        let cache = InMemoryResultCache::new();
        cache.set(key("ASK {}"), bindings("a")).await;
        tokio::time::advance(Duration::from_secs(3600)).await;

        assert!(cache.get(&key("ASK {}")).await.is_none());
        assert_eq!(cache.len().await, 1);

        assert_eq!(cache.purge_expired().await, 1);
        assert_eq!(cache.len().await, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reinsert_restarts_ttl() {
        let cache = InMemoryResultCache::new();
        cache.set(key("ASK {}"), bindings("a")).await;

        tokio::time::advance(Duration::from_secs(3000)).await;
        cache.set(key("ASK {}"), bindings("b")).await;
        tokio::time::advance(Duration::from_secs(3000)).await;

        assert_eq!(cache.get(&key("ASK {}")).await, Some(bindings("b")));
    }

    #[tokio::test(start_paused = true)]
    async fn test_purge_expired_removes_only_expired() {
        let cache = InMemoryResultCache::new();
        cache.set(key("old"), bindings("a")).await;

        tokio::time::advance(Duration::from_secs(1800)).await;
        cache.set(key("new"), bindings("b")).await;

        tokio::time::advance(Duration::from_secs(1800)).await;
        let removed = cache.purge_expired().await;

        assert_eq!(removed, 1);
        assert_eq!(cache.len().await, 1);
        assert!(cache.get(&key("new")).await.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweeper_removes_expired_entries() {
        let config = InMemoryCacheConfig::default()
            .with_ttl(Duration::from_secs(60))
            .with_sweep_interval(Duration::from_secs(600));
        let cache = Arc::new(InMemoryResultCache::with_config(config));
        let handle = cache.spawn_sweeper();

        cache.set(key("ASK {}"), bindings("a")).await;
        assert_eq!(cache.len().await, 1);

        tokio::time::sleep(Duration::from_secs(601)).await;

        assert_eq!(cache.len().await, 0);
        handle.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweeper_stops_when_cache_dropped() {
        let cache = Arc::new(InMemoryResultCache::new());
        let handle = cache.spawn_sweeper();
        drop(cache);

        tokio::time::sleep(Duration::from_secs(601)).await;

        assert!(handle.await.is_ok());
    }

    #[tokio::test]
    async fn test_bounded_cache_evicts() {
        let config = InMemoryCacheConfig::default().with_max_capacity(10);
        let cache = InMemoryResultCache::with_config(config);

        for i in 0..100 {
            cache.set(key(&format!("SELECT {}", i)), bindings("a")).await;
        }

        assert!(cache.len().await <= 10);
    }

    #[test]
    fn test_default_config() {
        let config = InMemoryCacheConfig::default();

        assert_eq!(config.ttl, Duration::from_secs(3600));
        assert_eq!(config.sweep_interval, Duration::from_secs(600));
        assert!(config.max_capacity.is_none());
    }
}
