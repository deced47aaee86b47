//! Caching layer for place descriptions.
//!
//! Place summaries change rarely and the same landmarks show up across
//! planning sessions, so results are cached by place name. Negative
//! results ("no article") are cached too: asking again will not make an
//! article appear. Failures are not cached, so a later retry can still
//! succeed.

use std::time::Duration;

use moka::future::Cache as MokaCache;

use super::client::DescriptionClient;
use super::error::DescriptionError;

/// Cached lookup result: `None` means the provider had no text.
type Entry = Option<String>;

/// Configuration for the description cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(24 * 60 * 60),
            max_capacity: 10_000,
        }
    }
}

/// Cache for description lookups, keyed by place name.
pub struct DescriptionCache {
    entries: MokaCache<String, Entry>,
}

impl DescriptionCache {
    /// Create a new cache with the given configuration.
    pub fn new(config: &CacheConfig) -> Self {
        let entries = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { entries }
    }

    /// Get a cached lookup result.
    pub async fn get(&self, name: &str) -> Option<Entry> {
        self.entries.get(name).await
    }

    /// Insert a lookup result.
    pub async fn insert(&self, name: String, entry: Entry) {
        self.entries.insert(name, entry).await;
    }
}

/// Description client with caching.
///
/// Wraps a `DescriptionClient` and caches lookups by place name.
pub struct CachedDescriptions {
    client: DescriptionClient,
    cache: DescriptionCache,
}

impl CachedDescriptions {
    /// Create a new cached client.
    pub fn new(client: DescriptionClient, cache_config: &CacheConfig) -> Self {
        Self {
            client,
            cache: DescriptionCache::new(cache_config),
        }
    }

    /// Fetch a description, using the cache if possible.
    ///
    /// # Errors
    ///
    /// Returns `Err` for transport or API failures. Those are never
    /// cached.
    pub async fn fetch(&self, name: &str) -> Result<Option<String>, DescriptionError> {
        // Try cache first
        if let Some(cached) = self.cache.get(name).await {
            return Ok(cached);
        }

        let fetched = self.client.fetch(name).await?;
        self.cache.insert(name.to_string(), fetched.clone()).await;

        Ok(fetched)
    }
}
