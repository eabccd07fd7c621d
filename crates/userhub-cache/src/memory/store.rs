//! In-memory cache implementation using the moka crate.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use moka::future::Cache;

use userhub_core::config::cache::MemoryCacheConfig;
use userhub_core::result::AppResult;
use userhub_core::traits::cache::CacheProvider;

/// A cached value together with its deadline.
#[derive(Debug, Clone)]
struct Entry {
    value: String,
    /// `None` when the TTL is too large to represent; the entry then never expires.
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_live(&self) -> bool {
        self.expires_at.is_none_or(|deadline| Instant::now() < deadline)
    }
}

/// In-memory cache provider using moka.
///
/// Each entry carries its own deadline; expired entries are invisible to
/// reads and are dropped lazily.
#[derive(Debug, Clone)]
pub struct MemoryCacheProvider {
    /// The underlying moka cache.
    cache: Cache<String, Entry>,
}

impl MemoryCacheProvider {
    /// Create a new in-memory cache from configuration.
    pub fn new(config: &MemoryCacheConfig) -> Self {
        let cache = Cache::builder().max_capacity(config.max_capacity).build();
        Self { cache }
    }
}

impl Default for MemoryCacheProvider {
    fn default() -> Self {
        Self::new(&MemoryCacheConfig::default())
    }
}

#[async_trait]
impl CacheProvider for MemoryCacheProvider {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        match self.cache.get(key).await {
            Some(entry) if entry.is_live() => Ok(Some(entry.value)),
            Some(_) => {
                self.cache.invalidate(key).await;
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()> {
        let entry = Entry {
            value: value.to_string(),
            expires_at: Instant::now().checked_add(ttl),
        };
        self.cache.insert(key.to_string(), entry).await;
        Ok(())
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.cache.invalidate(key).await;
        Ok(())
    }

    async fn take(&self, key: &str) -> AppResult<Option<String>> {
        // `remove` hands the value to exactly one caller.
        Ok(self
            .cache
            .remove(key)
            .await
            .filter(Entry::is_live)
            .map(|entry| entry.value))
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}
