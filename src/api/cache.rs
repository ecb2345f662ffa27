//! TTL response cache backed by moka

use std::time::Duration;

use moka::sync::Cache;

use crate::error::LedgerResult;

const DEFAULT_CAPACITY: u64 = 100;

/// In-memory cache of decoded API responses, keyed by request shape
#[derive(Clone)]
pub struct ResponseCache<V: Clone + Send + Sync + 'static> {
    cache: Cache<String, V>,
}

impl<V: Clone + Send + Sync + 'static> ResponseCache<V> {
    pub fn new(ttl: Duration) -> Self {
        Self::with_capacity(DEFAULT_CAPACITY, ttl)
    }

    pub fn with_capacity(max_capacity: u64, ttl: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_capacity)
            .time_to_live(ttl)
            .build();
        Self { cache }
    }

    /// Return the cached value for `key`, or run `fetch` and cache its result.
    /// Errors are not cached.
    pub fn get_or_fetch<F>(&self, key: &str, fetch: F) -> LedgerResult<V>
    where
        F: FnOnce() -> LedgerResult<V>,
    {
        if let Some(hit) = self.cache.get(key) {
            tracing::debug!(key, "cache hit");
            return Ok(hit);
        }

        let value = fetch()?;
        self.cache.insert(key.to_string(), value.clone());
        Ok(value)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.cache.contains_key(key)
    }

    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
    }
}
