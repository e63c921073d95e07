//! Typed query cache using moka.

use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use moka::future::Cache;
use tracing::debug;

use storefront_core::config::cache::CacheConfig;
use storefront_core::error::AppError;
use storefront_core::result::AppResult;

/// Time-boxed cache from a logical query key to its result.
///
/// Failed fetches are never stored; the next caller retries. A fetch that
/// was already running when an invalidation happened still answers its
/// callers, but its result is evicted instead of being served afterwards.
#[derive(Clone)]
pub struct QueryCache<V> {
    /// Name used in log lines.
    name: &'static str,
    /// `None` when caching is disabled.
    cache: Option<Cache<String, V>>,
    /// Bumped by every invalidation.
    generation: Arc<AtomicU64>,
}

impl<V> fmt::Debug for QueryCache<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryCache")
            .field("name", &self.name)
            .field("enabled", &self.cache.is_some())
            .finish()
    }
}

impl<V> QueryCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    /// Create a cache from configuration.
    pub fn new(name: &'static str, config: &CacheConfig) -> Self {
        if !config.enabled {
            return Self::disabled(name);
        }

        let cache = Cache::builder()
            .max_capacity(config.max_capacity)
            .time_to_live(Duration::from_secs(config.default_ttl_seconds))
            .build();

        Self {
            name,
            cache: Some(cache),
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Create a pass-through cache that always fetches.
    pub fn disabled(name: &'static str) -> Self {
        Self {
            name,
            cache: None,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Whether results are retained between calls.
    pub fn is_enabled(&self) -> bool {
        self.cache.is_some()
    }

    /// Return the cached value for `key`, or run `fetch` to produce it.
    ///
    /// If another caller is already fetching `key`, this call waits for that
    /// fetch instead of starting a second one.
    pub async fn get_or_fetch<F>(&self, key: String, fetch: F) -> AppResult<V>
    where
        F: Future<Output = AppResult<V>> + Send,
    {
        let Some(cache) = &self.cache else {
            return fetch.await;
        };

        let started = self.generation.load(Ordering::SeqCst);
        let value = cache
            .try_get_with(key.clone(), fetch)
            .await
            .map_err(|e: Arc<AppError>| e.as_ref().clone())?;

        if self.generation.load(Ordering::SeqCst) != started {
            cache.invalidate(&key).await;
            debug!(cache = self.name, key = %key, "Evicted result fetched across an invalidation");
        }
        Ok(value)
    }

    /// Drop a single entry.
    pub async fn invalidate(&self, key: &str) {
        if let Some(cache) = &self.cache {
            self.generation.fetch_add(1, Ordering::SeqCst);
            cache.invalidate(key).await;
            debug!(cache = self.name, key, "Invalidated cache entry");
        }
    }

    /// Drop every entry whose key starts with `prefix`. Returns how many.
    pub async fn invalidate_prefix(&self, prefix: &str) -> u64 {
        let Some(cache) = &self.cache else {
            return 0;
        };
        self.generation.fetch_add(1, Ordering::SeqCst);

        let keys: Vec<Arc<String>> = cache
            .iter()
            .filter(|(key, _)| key.starts_with(prefix))
            .map(|(key, _)| key)
            .collect();

        let mut count = 0u64;
        for key in keys {
            cache.invalidate(key.as_str()).await;
            count += 1;
        }

        debug!(cache = self.name, prefix, count, "Invalidated cache entries by prefix");
        count
    }

    /// Drop everything.
    pub fn invalidate_all(&self) {
        if let Some(cache) = &self.cache {
            self.generation.fetch_add(1, Ordering::SeqCst);
            cache.invalidate_all();
        }
    }
}
