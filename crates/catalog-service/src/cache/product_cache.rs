//! Product cache interface.

use crate::dto::ProductResponse;
use async_trait::async_trait;
use catalog_core::{CatalogResult, Interface, ProductId};

/// Cache of product projections.
///
/// Holds one entry per product and one entry for the whole collection. Any
/// change to a product entry invalidates the collection entry. Every
/// operation is idempotent; a missing entry is `None`, never an error.
/// Errors report backend failures only and callers may ignore them.
#[async_trait]
pub trait ProductCache: Interface + Send + Sync {
    /// Gets a cached product.
    async fn get(&self, id: ProductId) -> CatalogResult<Option<ProductResponse>>;

    /// Gets the cached collection of all products.
    async fn get_all(&self) -> CatalogResult<Option<Vec<ProductResponse>>>;

    /// Caches a product and invalidates the collection entry.
    async fn set(&self, id: ProductId, product: &ProductResponse) -> CatalogResult<()>;

    /// Caches the collection of all products. Product entries are untouched.
    async fn set_all(&self, products: &[ProductResponse]) -> CatalogResult<()>;

    /// Removes a product entry and invalidates the collection entry.
    async fn remove(&self, id: ProductId) -> CatalogResult<()>;

    /// Removes the collection entry only.
    async fn remove_all(&self) -> CatalogResult<()>;
}
