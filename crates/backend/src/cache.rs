//! Cache for catalog listings.
//!
//! Each key carries a generation counter that every invalidation bumps. A
//! listing fetched while a write was in flight is therefore never stored.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use food_store_core::dto::{CategoryDto, ProductDto};
use moka::future::Cache;

/// Cache key for catalog listings.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum CacheKey {
    Categories,
    Products,
}

/// Cached value types.
#[derive(Debug, Clone)]
pub enum CacheValue {
    Categories(Arc<Vec<CategoryDto>>),
    Products(Arc<Vec<ProductDto>>),
}

/// TTL cache of catalog listings with invalidation-safe fills.
pub struct CatalogCache {
    entries: Cache<CacheKey, CacheValue>,
    categories_generation: AtomicU64,
    products_generation: AtomicU64,
}

impl CatalogCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Cache::builder()
                .max_capacity(16)
                .time_to_live(ttl)
                .build(),
            categories_generation: AtomicU64::new(0),
            products_generation: AtomicU64::new(0),
        }
    }

    const fn counter(&self, key: CacheKey) -> &AtomicU64 {
        match key {
            CacheKey::Categories => &self.categories_generation,
            CacheKey::Products => &self.products_generation,
        }
    }

    pub async fn get(&self, key: CacheKey) -> Option<CacheValue> {
        self.entries.get(&key).await
    }

    /// Current generation of `key`. Capture it before fetching a listing.
    pub fn generation(&self, key: CacheKey) -> u64 {
        self.counter(key).load(Ordering::Acquire)
    }

    /// Store a listing fetched at `generation`.
    ///
    /// Returns `false` (and stores nothing) if `key` was invalidated since.
    pub async fn insert_if_current(&self, key: CacheKey, generation: u64, value: CacheValue) -> bool {
        if self.generation(key) != generation {
            return false;
        }
        self.entries.insert(key, value).await;

        // An invalidation may have landed between the check and the insert.
        if self.generation(key) != generation {
            self.entries.invalidate(&key).await;
            return false;
        }
        true
    }

    pub async fn invalidate(&self, key: CacheKey) {
        self.counter(key).fetch_add(1, Ordering::AcqRel);
        self.entries.invalidate(&key).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn products() -> CacheValue {
        CacheValue::Products(Arc::new(Vec::new()))
    }

    #[tokio::test]
    async fn test_fill_is_stored() {
        let cache = CatalogCache::new(Duration::from_secs(30));
        let generation = cache.generation(CacheKey::Products);

        assert!(cache.insert_if_current(CacheKey::Products, generation, products()).await);
        assert!(cache.get(CacheKey::Products).await.is_some());
    }

    #[tokio::test]
    async fn test_fill_after_invalidation_is_dropped() {
        let cache = CatalogCache::new(Duration::from_secs(30));
        let generation = cache.generation(CacheKey::Products);

        cache.invalidate(CacheKey::Products).await;

        assert!(!cache.insert_if_current(CacheKey::Products, generation, products()).await);
        assert!(cache.get(CacheKey::Products).await.is_none());
    }

    #[tokio::test]
    async fn test_generations_are_per_key() {
        let cache = CatalogCache::new(Duration::from_secs(30));
        let generation = cache.generation(CacheKey::Products);

        cache.invalidate(CacheKey::Categories).await;

        assert_eq!(cache.generation(CacheKey::Products), generation);
        assert_eq!(cache.generation(CacheKey::Categories), 1);
    }
}
