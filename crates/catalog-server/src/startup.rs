//! Server startup utilities.

use catalog_config::AppConfig;
use catalog_core::CatalogResult;
use catalog_repository::ProductRepository;
use catalog_service::{CreateProductRequest, ProductService};
use tracing::info;

/// Prints the startup banner.
pub fn print_banner() {
    info!(r#"
   ______      __        __
  / ____/___ _/ /_____ _/ /___  ____ _
 / /   / __ `/ __/ __ `/ / __ \/ __ `/
/ /___/ /_/ / /_/ /_/ / / /_/ / /_/ /
\____/\__,_/\__/\__,_/_/\____/\__, /
                             /____/
    "#);
}

/// Prints server startup information.
pub fn print_startup_info(config: &AppConfig) {
    let addr = config.server.addr();
    let separator = "=".repeat(60);
    info!("{}", separator);
    info!("REST API:  http://{}/api/v1/products", addr);
    info!("Paged API: http://{}/api/v2/products", addr);
    info!("Health:    http://{}/health", addr);
    info!("API Docs:  http://{}/swagger-ui", addr);
    if config.observability.metrics_enabled {
        info!("Metrics:   http://{}{}", addr, config.observability.metrics_path);
    }
    info!("{}", separator);
}

fn sample_products() -> Vec<CreateProductRequest> {
    [
        ("Laptop", "High-performance laptop", 1299.99, 10),
        ("Mouse", "Wireless mouse", 29.99, 50),
        ("Keyboard", "Mechanical keyboard", 89.99, 30),
    ]
    .into_iter()
    .map(|(name, description, price, stock)| CreateProductRequest {
        name: name.to_string(),
        description: description.to_string(),
        price,
        stock,
    })
    .collect()
}

/// Seeds sample products when the store holds none.
///
/// Goes through the service so the cache stays consistent with the store.
/// Returns the number of products created.
pub async fn seed_if_empty(
    repository: &dyn ProductRepository,
    service: &dyn ProductService,
) -> CatalogResult<usize> {
    if repository.count().await? > 0 {
        return Ok(0);
    }

    let products = sample_products();
    let seeded = products.len();
    for request in products {
        service.create(request).await?;
    }

    info!("Seeded {} sample products", seeded);
    Ok(seeded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_repository::InMemoryProductRepository;
    use catalog_service::{InMemoryProductCache, ProductServiceImpl};
    use std::sync::Arc;

    #[test]
    fn test_print_banner_does_not_panic() {
        let _ = tracing_subscriber::fmt::try_init();
        print_banner();
        print_startup_info(&AppConfig::default());
    }

    #[tokio::test]
    async fn test_seed_only_when_empty() {
        let repository = Arc::new(InMemoryProductRepository::new());
        let service = ProductServiceImpl::new(
            repository.clone(),
            Arc::new(InMemoryProductCache::default()),
        );

        assert_eq!(seed_if_empty(repository.as_ref(), &service).await.unwrap(), 3);
        assert_eq!(seed_if_empty(repository.as_ref(), &service).await.unwrap(), 0);

        let names: Vec<String> = service
            .get_all()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["Laptop", "Mouse", "Keyboard"]);
    }
}
