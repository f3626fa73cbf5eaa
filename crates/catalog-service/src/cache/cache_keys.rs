//! Cache key generators for consistent key naming.

use catalog_core::ProductId;

/// Prefix for all product cache keys.
const CACHE_PREFIX: &str = "catalog:products";

/// Key of the cached all-products collection.
pub const ALL_PRODUCTS_KEY: &str = "catalog:products:all";

/// Generate a cache key for a product by ID.
#[must_use]
pub fn product_by_id(id: ProductId) -> String {
    format!("{}:{}", CACHE_PREFIX, id)
}
