//! Product service implementation.

use crate::cache::ProductCache;
use crate::dto::{CreateProductRequest, ProductResponse, UpdateProductRequest};
use crate::product_service::ProductService;
use crate::telemetry::{
    record_cache_error, record_cache_hit, record_cache_miss, SCOPE_AGGREGATE, SCOPE_ENTITY,
};
use async_trait::async_trait;
use catalog_core::{CatalogResult, Page, PageRequest, ProductId, ValidateExt};
use catalog_domain::Product;
use catalog_repository::ProductRepository;
use shaku::Component;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Cache-aside product service.
///
/// Reads try the cache first and fill it from the store on a miss. Writes go
/// to the store first; the cache is then pre-warmed (create) or invalidated
/// (update, delete). Cache failures never fail a call: reads fall back to
/// the store and write-side cache errors are logged and dropped.
#[derive(Component)]
#[shaku(interface = ProductService)]
pub struct ProductServiceImpl {
    #[shaku(inject)]
    repository: Arc<dyn ProductRepository>,
    #[shaku(inject)]
    cache: Arc<dyn ProductCache>,
}

impl ProductServiceImpl {
    /// Creates a new product service.
    #[must_use]
    pub fn new(repository: Arc<dyn ProductRepository>, cache: Arc<dyn ProductCache>) -> Self {
        Self { repository, cache }
    }

    async fn cached_product(&self, id: ProductId) -> Option<ProductResponse> {
        match self.cache.get(id).await {
            Ok(Some(product)) => {
                record_cache_hit(SCOPE_ENTITY);
                debug!(product_id = %id, "Cache hit");
                Some(product)
            }
            Ok(None) => {
                record_cache_miss(SCOPE_ENTITY);
                debug!(product_id = %id, "Cache miss");
                None
            }
            Err(e) => {
                record_cache_error("get");
                warn!(product_id = %id, error = %e, "Cache read failed, falling back to store");
                None
            }
        }
    }

    async fn cached_products(&self) -> Option<Vec<ProductResponse>> {
        match self.cache.get_all().await {
            Ok(Some(products)) => {
                record_cache_hit(SCOPE_AGGREGATE);
                debug!(count = products.len(), "Cache hit for all products");
                Some(products)
            }
            Ok(None) => {
                record_cache_miss(SCOPE_AGGREGATE);
                debug!("Cache miss for all products");
                None
            }
            Err(e) => {
                record_cache_error("get_all");
                warn!(error = %e, "Cache read failed, falling back to store");
                None
            }
        }
    }

    async fn populate(&self, product: &ProductResponse) {
        if let Err(e) = self.cache.set(product.id, product).await {
            record_cache_error("set");
            warn!(product_id = %product.id, error = %e, "Failed to cache product");
        }
    }

    async fn populate_all(&self, products: &[ProductResponse]) {
        if let Err(e) = self.cache.set_all(products).await {
            record_cache_error("set_all");
            warn!(error = %e, "Failed to cache product collection");
        }
    }

    async fn invalidate(&self, id: ProductId) {
        if let Err(e) = self.cache.remove(id).await {
            record_cache_error("remove");
            warn!(product_id = %id, error = %e, "Failed to invalidate cached product");
        }
    }
}

#[async_trait]
impl ProductService for ProductServiceImpl {
    async fn get_by_id(&self, id: ProductId) -> CatalogResult<Option<ProductResponse>> {
        debug!(product_id = %id, "Getting product");

        if let Some(cached) = self.cached_product(id).await {
            return Ok(Some(cached));
        }

        // Absent products are not cached.
        let Some(product) = self.repository.find_by_id(id).await? else {
            return Ok(None);
        };

        let response = ProductResponse::from(&product);
        self.populate(&response).await;
        Ok(Some(response))
    }

    async fn get_all(&self) -> CatalogResult<Vec<ProductResponse>> {
        debug!("Getting all products");

        if let Some(cached) = self.cached_products().await {
            return Ok(cached);
        }

        let products: Vec<ProductResponse> = self
            .repository
            .find_all()
            .await?
            .iter()
            .map(ProductResponse::from)
            .collect();

        self.populate_all(&products).await;
        Ok(products)
    }

    async fn list_page(&self, page: PageRequest) -> CatalogResult<Page<ProductResponse>> {
        debug!("Listing products, page: {}, size: {}", page.page, page.size);

        let products = self.get_all().await?;
        Ok(Page::from_collection(products, page))
    }

    async fn create(&self, request: CreateProductRequest) -> CatalogResult<ProductResponse> {
        debug!("Creating product: {}", request.name);

        request.validate_request()?;

        let product = Product::new(request.name, request.description, request.price, request.stock)?;
        let saved = self.repository.create(&product).await?;

        let response = ProductResponse::from(&saved);
        self.populate(&response).await;

        info!(product_id = %response.id, "Product created");
        Ok(response)
    }

    async fn update(&self, id: ProductId, request: UpdateProductRequest) -> CatalogResult<bool> {
        debug!(product_id = %id, "Updating product");

        request.validate_request()?;

        let Some(mut product) = self.repository.find_by_id(id).await? else {
            debug!(product_id = %id, "Product to update not found");
            return Ok(false);
        };

        if let Some(name) = request.name {
            product.update_name(name)?;
        }
        if let Some(description) = request.description {
            product.update_description(description);
        }
        if let Some(price) = request.price {
            product.update_price(price)?;
        }
        if let Some(stock) = request.stock {
            product.update_stock(stock)?;
        }

        let updated = self.repository.update(&product).await?;
        if updated {
            self.invalidate(id).await;
            info!(product_id = %id, "Product updated");
        }
        Ok(updated)
    }

    async fn delete(&self, id: ProductId) -> CatalogResult<bool> {
        debug!(product_id = %id, "Deleting product");

        let deleted = self.repository.delete(id).await?;
        if deleted {
            self.invalidate(id).await;
            info!(product_id = %id, "Product deleted");
        }
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::InMemoryProductCache;
    use catalog_core::CatalogError;
    use catalog_repository::InMemoryProductRepository;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Store wrapper counting reads.
    #[derive(Default)]
    struct CountingRepository {
        inner: InMemoryProductRepository,
        find_by_id_calls: AtomicUsize,
        find_all_calls: AtomicUsize,
        update_calls: AtomicUsize,
    }

    impl CountingRepository {
        fn find_by_id_calls(&self) -> usize {
            self.find_by_id_calls.load(Ordering::SeqCst)
        }

        fn find_all_calls(&self) -> usize {
            self.find_all_calls.load(Ordering::SeqCst)
        }

        fn update_calls(&self) -> usize {
            self.update_calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ProductRepository for CountingRepository {
        async fn find_by_id(&self, id: ProductId) -> CatalogResult<Option<Product>> {
            self.find_by_id_calls.fetch_add(1, Ordering::SeqCst);
            self.inner.find_by_id(id).await
        }

        async fn find_all(&self) -> CatalogResult<Vec<Product>> {
            self.find_all_calls.fetch_add(1, Ordering::SeqCst);
            self.inner.find_all().await
        }

        async fn create(&self, product: &Product) -> CatalogResult<Product> {
            self.inner.create(product).await
        }

        async fn update(&self, product: &Product) -> CatalogResult<bool> {
            self.update_calls.fetch_add(1, Ordering::SeqCst);
            self.inner.update(product).await
        }

        async fn delete(&self, id: ProductId) -> CatalogResult<bool> {
            self.inner.delete(id).await
        }

        async fn count(&self) -> CatalogResult<u64> {
            self.inner.count().await
        }
    }

    /// Store whose every call fails.
    struct BrokenRepository;

    #[async_trait]
    impl ProductRepository for BrokenRepository {
        async fn find_by_id(&self, _id: ProductId) -> CatalogResult<Option<Product>> {
            Err(CatalogError::Database("connection refused".to_string()))
        }

        async fn find_all(&self) -> CatalogResult<Vec<Product>> {
            Err(CatalogError::Database("connection refused".to_string()))
        }

        async fn create(&self, _product: &Product) -> CatalogResult<Product> {
            Err(CatalogError::Database("connection refused".to_string()))
        }

        async fn update(&self, _product: &Product) -> CatalogResult<bool> {
            Err(CatalogError::Database("connection refused".to_string()))
        }

        async fn delete(&self, _id: ProductId) -> CatalogResult<bool> {
            Err(CatalogError::Database("connection refused".to_string()))
        }

        async fn count(&self) -> CatalogResult<u64> {
            Err(CatalogError::Database("connection refused".to_string()))
        }
    }

    /// Cache whose every call fails.
    struct FailingCache;

    #[async_trait]
    impl ProductCache for FailingCache {
        async fn get(&self, _id: ProductId) -> CatalogResult<Option<ProductResponse>> {
            Err(CatalogError::cache("unavailable"))
        }

        async fn get_all(&self) -> CatalogResult<Option<Vec<ProductResponse>>> {
            Err(CatalogError::cache("unavailable"))
        }

        async fn set(&self, _id: ProductId, _product: &ProductResponse) -> CatalogResult<()> {
            Err(CatalogError::cache("unavailable"))
        }

        async fn set_all(&self, _products: &[ProductResponse]) -> CatalogResult<()> {
            Err(CatalogError::cache("unavailable"))
        }

        async fn remove(&self, _id: ProductId) -> CatalogResult<()> {
            Err(CatalogError::cache("unavailable"))
        }

        async fn remove_all(&self) -> CatalogResult<()> {
            Err(CatalogError::cache("unavailable"))
        }
    }

    struct Fixture {
        repository: Arc<CountingRepository>,
        cache: Arc<InMemoryProductCache>,
        service: ProductServiceImpl,
    }

    fn fixture() -> Fixture {
        let repository = Arc::new(CountingRepository::default());
        let cache = Arc::new(InMemoryProductCache::default());
        let service = ProductServiceImpl::new(repository.clone(), cache.clone());
        Fixture {
            repository,
            cache,
            service,
        }
    }

    fn create_request(name: &str, price: f64, stock: i32) -> CreateProductRequest {
        CreateProductRequest {
            name: name.to_string(),
            description: format!("{name} description"),
            price,
            stock,
        }
    }

    #[tokio::test]
    async fn test_create_scenario() {
        let f = fixture();

        let created = f
            .service
            .create(CreateProductRequest {
                name: "Laptop".to_string(),
                description: "High-performance laptop".to_string(),
                price: 1299.99,
                stock: 10,
            })
            .await
            .unwrap();

        assert_eq!(created.name, "Laptop");
        assert_eq!(created.price, 1299.99);
        assert_eq!(created.stock, 10);
        assert!(created.updated_at.is_none());

        let fetched = f.service.get_by_id(created.id).await.unwrap();
        assert_eq!(fetched, Some(created.clone()));

        let all = f.service.get_all().await.unwrap();
        assert_eq!(all, vec![created]);
    }

    #[tokio::test]
    async fn test_get_by_id_missing_is_not_cached() {
        let f = fixture();
        let id = ProductId::new();

        assert!(f.service.get_by_id(id).await.unwrap().is_none());
        assert!(f.cache.get(id).await.unwrap().is_none());

        assert!(f.service.get_by_id(id).await.unwrap().is_none());
        assert_eq!(f.repository.find_by_id_calls(), 2);
    }

    #[tokio::test]
    async fn test_get_by_id_populates_cache_on_miss() {
        let f = fixture();
        let product = Product::new("Mouse", "", 29.99, 50).unwrap();
        f.repository.inner.create(&product).await.unwrap();

        let first = f.service.get_by_id(product.id()).await.unwrap();
        let second = f.service.get_by_id(product.id()).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(f.repository.find_by_id_calls(), 1);
        assert_eq!(f.cache.get(product.id()).await.unwrap(), first);
    }

    #[tokio::test]
    async fn test_create_prewarms_cache_and_invalidates_aggregate() {
        let f = fixture();
        f.service.get_all().await.unwrap();
        assert!(f.cache.get_all().await.unwrap().is_some());

        let created = f.service.create(create_request("Mouse", 29.99, 50)).await.unwrap();

        assert!(f.cache.get_all().await.unwrap().is_none());
        assert_eq!(f.service.get_by_id(created.id).await.unwrap(), Some(created));
        assert_eq!(f.repository.find_by_id_calls(), 0);
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_request() {
        let f = fixture();

        let err = f.service.create(create_request("  ", 29.99, 50)).await.unwrap_err();
        assert!(matches!(err, CatalogError::Validation(_)));

        let err = f.service.create(create_request("Mouse", 0.0, 50)).await.unwrap_err();
        assert!(matches!(err, CatalogError::Validation(_)));

        assert_eq!(f.repository.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_update_invalidates_and_next_read_hits_store() {
        let f = fixture();
        let created = f.service.create(create_request("Keyboard", 89.99, 30)).await.unwrap();

        let request = UpdateProductRequest {
            name: Some("Mechanical Keyboard".to_string()),
            stock: Some(25),
            ..Default::default()
        };
        assert!(f.service.update(created.id, request).await.unwrap());
        assert!(f.cache.get(created.id).await.unwrap().is_none());

        let reads_before = f.repository.find_by_id_calls();
        let fetched = f.service.get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(f.repository.find_by_id_calls(), reads_before + 1);

        assert_eq!(fetched.name, "Mechanical Keyboard");
        assert_eq!(fetched.stock, 25);
        assert_eq!(fetched.price, 89.99);
        assert_eq!(fetched.description, "Keyboard description");
        assert!(fetched.updated_at.is_some());
    }

    #[tokio::test]
    async fn test_update_validates_before_store_and_keeps_cache() {
        let f = fixture();
        let created = f.service.create(create_request("Mouse", 29.99, 50)).await.unwrap();

        let request = UpdateProductRequest {
            stock: Some(-1),
            ..Default::default()
        };
        let err = f.service.update(created.id, request).await.unwrap_err();

        assert!(matches!(err, CatalogError::Validation(_)));
        assert_eq!(f.repository.find_by_id_calls(), 0);
        assert_eq!(f.repository.update_calls(), 0);
        assert_eq!(f.cache.get(created.id).await.unwrap(), Some(created));
    }

    #[tokio::test]
    async fn test_update_missing_returns_false() {
        let f = fixture();
        f.service.get_all().await.unwrap();

        let request = UpdateProductRequest {
            price: Some(10.0),
            ..Default::default()
        };
        assert!(!f.service.update(ProductId::new(), request).await.unwrap());

        assert_eq!(f.repository.update_calls(), 0);
        assert!(f.cache.get_all().await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_delete_removes_cached_entry() {
        let f = fixture();
        let created = f.service.create(create_request("Mouse", 29.99, 50)).await.unwrap();
        f.service.get_all().await.unwrap();

        assert!(f.service.delete(created.id).await.unwrap());

        assert!(f.cache.get(created.id).await.unwrap().is_none());
        assert!(f.cache.get_all().await.unwrap().is_none());
        assert!(f.service.get_by_id(created.id).await.unwrap().is_none());
        assert!(!f.service.delete(created.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_get_all_cached_as_unit_and_invalidated_by_writes() {
        let f = fixture();
        let mouse = f.service.create(create_request("Mouse", 29.99, 50)).await.unwrap();

        f.service.get_all().await.unwrap();
        f.service.get_all().await.unwrap();
        assert_eq!(f.repository.find_all_calls(), 1);

        let keyboard = f.service.create(create_request("Keyboard", 89.99, 30)).await.unwrap();
        let all = f.service.get_all().await.unwrap();
        assert_eq!(f.repository.find_all_calls(), 2);
        assert_eq!(all.iter().map(|p| p.id).collect::<Vec<_>>(), vec![mouse.id, keyboard.id]);

        let request = UpdateProductRequest {
            price: Some(24.99),
            ..Default::default()
        };
        f.service.update(mouse.id, request).await.unwrap();
        let all = f.service.get_all().await.unwrap();
        assert_eq!(f.repository.find_all_calls(), 3);
        assert_eq!(all[0].price, 24.99);

        f.service.delete(keyboard.id).await.unwrap();
        let all = f.service.get_all().await.unwrap();
        assert_eq!(f.repository.find_all_calls(), 4);
        assert_eq!(all.len(), 1);
    }

    #[tokio::test]
    async fn test_list_page() {
        let f = fixture();
        for i in 1..=5 {
            f.service
                .create(create_request(&format!("Product {i}"), 10.0, i))
                .await
                .unwrap();
        }

        let page = f.service.list_page(PageRequest::new(2, 2)).await.unwrap();
        assert_eq!(page.total_count, 5);
        assert_eq!(page.total_pages, 3);
        assert_eq!(
            page.items.iter().map(|p| p.name.as_str()).collect::<Vec<_>>(),
            vec!["Product 3", "Product 4"]
        );

        let beyond = f.service.list_page(PageRequest::new(9, 2)).await.unwrap();
        assert!(beyond.items.is_empty());
        assert_eq!(beyond.total_count, 5);
        assert_eq!(f.repository.find_all_calls(), 1);
    }

    #[tokio::test]
    async fn test_cache_failures_never_fail_calls() {
        let repository = Arc::new(CountingRepository::default());
        let service = ProductServiceImpl::new(repository.clone(), Arc::new(FailingCache));

        let created = service.create(create_request("Mouse", 29.99, 50)).await.unwrap();
        assert_eq!(service.get_by_id(created.id).await.unwrap(), Some(created.clone()));
        assert_eq!(service.get_all().await.unwrap(), vec![created.clone()]);

        let request = UpdateProductRequest {
            stock: Some(49),
            ..Default::default()
        };
        assert!(service.update(created.id, request).await.unwrap());
        assert_eq!(service.get_by_id(created.id).await.unwrap().unwrap().stock, 49);

        assert!(service.delete(created.id).await.unwrap());
        assert!(service.get_by_id(created.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_store_errors_propagate() {
        let service =
            ProductServiceImpl::new(Arc::new(BrokenRepository), Arc::new(InMemoryProductCache::default()));

        let err = service.get_by_id(ProductId::new()).await.unwrap_err();
        assert!(matches!(err, CatalogError::Database(_)));

        let err = service.get_all().await.unwrap_err();
        assert!(matches!(err, CatalogError::Database(_)));

        let err = service.create(create_request("Mouse", 29.99, 50)).await.unwrap_err();
        assert!(matches!(err, CatalogError::Database(_)));

        let err = service.delete(ProductId::new()).await.unwrap_err();
        assert!(matches!(err, CatalogError::Database(_)));
    }
}
