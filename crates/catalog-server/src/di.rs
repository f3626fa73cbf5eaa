//! Dependency injection module using Shaku.
//!
//! `CatalogModule` binds the in-memory store and cache by default. The
//! configured backends replace them through component overrides, so the
//! service itself never knows which store or cache it talks to.

use catalog_config::AppConfig;
use catalog_core::{CatalogResult, HealthCheck};
use catalog_repository::{
    create_pool, DatabasePool, DatabasePoolInterface, InMemoryProductRepository,
    PgProductRepository, ProductRepository,
};
use catalog_service::{
    create_redis_pool, CacheEntryOptions, InMemoryProductCache, ProductCache, ProductService,
    ProductServiceImpl, RedisProductCache,
};
use shaku::{module, HasComponent};
use std::sync::Arc;
use tracing::info;

module! {
    pub CatalogModule {
        components = [
            InMemoryProductRepository,
            InMemoryProductCache,
            ProductServiceImpl,
        ],
        providers = [],
    }
}

/// The wired module plus the resources the server manages directly.
pub struct CatalogComponents {
    pub module: Arc<CatalogModule>,
    /// Dependencies checked by the readiness endpoint.
    pub health_checks: Vec<Arc<dyn HealthCheck>>,
    /// Present when the store is PostgreSQL.
    pub database: Option<Arc<DatabasePool>>,
}

impl CatalogComponents {
    /// Resolves the product service.
    pub fn product_service(&self) -> Arc<dyn ProductService> {
        self.module.resolve()
    }

    /// Resolves the product store.
    pub fn product_repository(&self) -> Arc<dyn ProductRepository> {
        self.module.resolve()
    }
}

/// Builds the module for the configured store and cache backends.
///
/// Connecting to PostgreSQL is eager and fails startup when unreachable.
/// The Redis pool connects lazily, so an unreachable Redis only degrades
/// reads to the store.
pub async fn build_catalog_module(config: &AppConfig) -> CatalogResult<CatalogComponents> {
    let mut builder = CatalogModule::builder();
    let mut health_checks: Vec<Arc<dyn HealthCheck>> = Vec::new();
    let mut database = None;

    if config.database.backend.is_postgres() {
        let pool = create_pool(&config.database).await?;
        if config.database.run_migrations {
            pool.run_migrations().await?;
        }

        let shared: Arc<dyn DatabasePoolInterface> = pool.clone();
        builder = builder
            .with_component_override::<dyn ProductRepository>(Box::new(PgProductRepository::new(shared)));
        health_checks.push(pool.clone());
        database = Some(pool);
    }
    info!("Product store: {}", config.database.backend);

    let options = CacheEntryOptions::from_config(&config.cache);
    if config.cache.backend.is_redis() {
        let pool = create_redis_pool(&config.redis)?;
        builder = builder.with_component_override::<dyn ProductCache>(Box::new(
            RedisProductCache::new(pool.clone(), options),
        ));
        health_checks.push(Arc::new(RedisProductCache::new(pool, options)));
    } else {
        builder = builder.with_component_override::<dyn ProductCache>(Box::new(
            InMemoryProductCache::new(options, config.cache.max_capacity),
        ));
    }
    info!(
        absolute_secs = config.cache.absolute_expiration_secs,
        sliding_secs = config.cache.sliding_expiration_secs,
        "Product cache: {}",
        config.cache.backend
    );

    Ok(CatalogComponents {
        module: Arc::new(builder.build()),
        health_checks,
        database,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_config::{CacheBackend, StoreBackend};
    use catalog_service::CreateProductRequest;

    fn memory_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.database.backend = StoreBackend::Memory;
        config.cache.backend = CacheBackend::Memory;
        config
    }

    #[test]
    fn test_module_provides_service() {
        fn assert_has_service<T: HasComponent<dyn ProductService>>() {}
        fn assert_has_repository<T: HasComponent<dyn ProductRepository>>() {}
        fn assert_has_cache<T: HasComponent<dyn ProductCache>>() {}

        assert_has_service::<CatalogModule>();
        assert_has_repository::<CatalogModule>();
        assert_has_cache::<CatalogModule>();
    }

    #[tokio::test]
    async fn test_memory_backends() {
        let components = build_catalog_module(&memory_config()).await.unwrap();
        assert!(components.database.is_none());
        assert!(components.health_checks.is_empty());

        let service = components.product_service();
        let created = service
            .create(CreateProductRequest {
                name: "Mouse".to_string(),
                description: String::new(),
                price: 29.99,
                stock: 50,
            })
            .await
            .unwrap();

        assert_eq!(service.get_by_id(created.id).await.unwrap(), Some(created));
        assert_eq!(components.product_repository().count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_unreachable_redis_is_unhealthy_but_service_works() {
        let mut config = memory_config();
        config.cache.backend = CacheBackend::Redis;
        config.redis.url = "redis://127.0.0.1:1".to_string();
        config.redis.pool_size = 1;

        let components = build_catalog_module(&config).await.unwrap();
        assert_eq!(components.health_checks.len(), 1);
        assert_eq!(components.health_checks[0].name(), "redis");
        assert!(components.health_checks[0].check().await.is_unhealthy());

        let service = components.product_service();
        assert!(service.get_all().await.unwrap().is_empty());
    }
}
