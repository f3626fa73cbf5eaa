//! Repository trait definitions.

use catalog_core::{CatalogResult, Interface, ProductId};
use catalog_domain::Product;
use async_trait::async_trait;

/// Product store.
///
/// Missing rows are reported as `None` / `false`, never as errors.
#[async_trait]
pub trait ProductRepository: Interface + Send + Sync {
    /// Finds a product by ID.
    async fn find_by_id(&self, id: ProductId) -> CatalogResult<Option<Product>>;

    /// Returns every product in creation order.
    async fn find_all(&self) -> CatalogResult<Vec<Product>>;

    /// Persists a new product and returns it as stored.
    async fn create(&self, product: &Product) -> CatalogResult<Product>;

    /// Overwrites an existing product. Returns `false` if it does not exist.
    async fn update(&self, product: &Product) -> CatalogResult<bool>;

    /// Deletes a product by ID. Returns `false` if it does not exist.
    async fn delete(&self, id: ProductId) -> CatalogResult<bool>;

    /// Counts all products.
    async fn count(&self) -> CatalogResult<u64>;
}
