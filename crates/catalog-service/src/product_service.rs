//! Product service trait definition.

use crate::dto::{CreateProductRequest, ProductResponse, UpdateProductRequest};
use async_trait::async_trait;
use catalog_core::{CatalogResult, Interface, Page, PageRequest, ProductId};

/// Product service trait.
///
/// Not-found is reported as `None` / `false` and left to the caller to
/// translate; validation failures surface as `CatalogError::Validation`.
#[async_trait]
pub trait ProductService: Interface + Send + Sync {
    /// Gets a product by ID, from cache when possible.
    async fn get_by_id(&self, id: ProductId) -> CatalogResult<Option<ProductResponse>>;

    /// Gets every product in creation order, from cache when possible.
    async fn get_all(&self) -> CatalogResult<Vec<ProductResponse>>;

    /// Gets one page of products.
    async fn list_page(&self, page: PageRequest) -> CatalogResult<Page<ProductResponse>>;

    /// Creates a product.
    async fn create(&self, request: CreateProductRequest) -> CatalogResult<ProductResponse>;

    /// Updates a product. Returns `false` if it does not exist.
    async fn update(&self, id: ProductId, request: UpdateProductRequest) -> CatalogResult<bool>;

    /// Deletes a product. Returns `false` if it does not exist.
    async fn delete(&self, id: ProductId) -> CatalogResult<bool>;
}
