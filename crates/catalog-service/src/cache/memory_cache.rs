//! Process-local product cache built on moka.

use super::cache_keys::{self, ALL_PRODUCTS_KEY};
use super::{CacheEntryOptions, ProductCache};
use crate::dto::ProductResponse;
use async_trait::async_trait;
use catalog_core::{CatalogResult, ProductId};
use moka::future::Cache;
use shaku::Component;
use std::sync::Arc;
use tracing::debug;

/// Maximum number of entries when nothing is configured.
pub const DEFAULT_MAX_CAPACITY: u64 = 10_000;

#[derive(Debug, Clone)]
enum CachedProducts {
    Single(ProductResponse),
    All(Arc<Vec<ProductResponse>>),
}

/// In-memory product cache.
///
/// moka's time-to-live enforces the absolute expiration and its
/// time-to-idle enforces the sliding window, so an entry read continuously
/// still expires at its absolute deadline.
#[derive(Component, Clone)]
#[shaku(interface = ProductCache)]
pub struct InMemoryProductCache {
    #[shaku(default = build_cache(CacheEntryOptions::default(), DEFAULT_MAX_CAPACITY))]
    entries: Cache<String, CachedProducts>,
}

fn build_cache(options: CacheEntryOptions, max_capacity: u64) -> Cache<String, CachedProducts> {
    Cache::builder()
        .max_capacity(max_capacity)
        .time_to_live(options.absolute_expiration)
        .time_to_idle(options.sliding_expiration)
        .build()
}

impl InMemoryProductCache {
    /// Creates a cache with the given expiration policy and capacity.
    #[must_use]
    pub fn new(options: CacheEntryOptions, max_capacity: u64) -> Self {
        Self {
            entries: build_cache(options, max_capacity),
        }
    }
}

impl Default for InMemoryProductCache {
    fn default() -> Self {
        Self::new(CacheEntryOptions::default(), DEFAULT_MAX_CAPACITY)
    }
}

#[async_trait]
impl ProductCache for InMemoryProductCache {
    async fn get(&self, id: ProductId) -> CatalogResult<Option<ProductResponse>> {
        match self.entries.get(&cache_keys::product_by_id(id)).await {
            Some(CachedProducts::Single(product)) => Ok(Some(product)),
            _ => Ok(None),
        }
    }

    async fn get_all(&self) -> CatalogResult<Option<Vec<ProductResponse>>> {
        match self.entries.get(ALL_PRODUCTS_KEY).await {
            Some(CachedProducts::All(products)) => Ok(Some(products.as_ref().clone())),
            _ => Ok(None),
        }
    }

    async fn set(&self, id: ProductId, product: &ProductResponse) -> CatalogResult<()> {
        self.entries
            .insert(cache_keys::product_by_id(id), CachedProducts::Single(product.clone()))
            .await;
        self.entries.invalidate(ALL_PRODUCTS_KEY).await;
        debug!(product_id = %id, "Cached product");
        Ok(())
    }

    async fn set_all(&self, products: &[ProductResponse]) -> CatalogResult<()> {
        self.entries
            .insert(
                ALL_PRODUCTS_KEY.to_string(),
                CachedProducts::All(Arc::new(products.to_vec())),
            )
            .await;
        debug!(count = products.len(), "Cached product collection");
        Ok(())
    }

    async fn remove(&self, id: ProductId) -> CatalogResult<()> {
        self.entries.invalidate(&cache_keys::product_by_id(id)).await;
        self.entries.invalidate(ALL_PRODUCTS_KEY).await;
        debug!(product_id = %id, "Removed cached product");
        Ok(())
    }

    async fn remove_all(&self) -> CatalogResult<()> {
        self.entries.invalidate(ALL_PRODUCTS_KEY).await;
        Ok(())
    }
}
