//! In-memory product repository.

use crate::traits::ProductRepository;
use async_trait::async_trait;
use catalog_core::{CatalogError, CatalogResult, ProductId};
use catalog_domain::Product;
use parking_lot::RwLock;
use shaku::Component;
use std::collections::HashMap;
use tracing::debug;

/// Product repository backed by a map guarded by a read-write lock.
///
/// Used when no database is configured and as the default binding of the
/// dependency-injection module. Data does not survive a restart.
#[derive(Component, Default)]
#[shaku(interface = ProductRepository)]
pub struct InMemoryProductRepository {
    #[shaku(default)]
    products: RwLock<HashMap<ProductId, Product>>,
}

impl InMemoryProductRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn find_by_id(&self, id: ProductId) -> CatalogResult<Option<Product>> {
        debug!("Finding product by id: {}", id);
        Ok(self.products.read().get(&id).cloned())
    }

    async fn find_all(&self) -> CatalogResult<Vec<Product>> {
        let mut products: Vec<Product> = self.products.read().values().cloned().collect();
        products.sort_by_key(|p| (p.created_at(), p.id()));
        Ok(products)
    }

    async fn create(&self, product: &Product) -> CatalogResult<Product> {
        debug!("Creating product: {}", product.id());
        let mut products = self.products.write();
        if products.contains_key(&product.id()) {
            return Err(CatalogError::conflict(format!(
                "Product {} already exists",
                product.id()
            )));
        }
        products.insert(product.id(), product.clone());
        Ok(product.clone())
    }

    async fn update(&self, product: &Product) -> CatalogResult<bool> {
        debug!("Updating product: {}", product.id());
        let mut products = self.products.write();
        match products.get_mut(&product.id()) {
            Some(existing) => {
                *existing = product.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: ProductId) -> CatalogResult<bool> {
        debug!("Deleting product: {}", id);
        Ok(self.products.write().remove(&id).is_some())
    }

    async fn count(&self) -> CatalogResult<u64> {
        Ok(self.products.read().len() as u64)
    }
}
