//! PostgreSQL product repository implementation.

use crate::{traits::ProductRepository, DatabasePoolInterface};
use async_trait::async_trait;
use catalog_core::{CatalogResult, ProductId};
use catalog_domain::{Product, ProductRecord};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// PostgreSQL product repository.
#[derive(Clone)]
pub struct PgProductRepository {
    pool: Arc<dyn DatabasePoolInterface>,
}

impl PgProductRepository {
    /// Creates a new PostgreSQL product repository.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }
}

/// Database row representation of a product.
#[derive(Debug, FromRow)]
struct ProductRow {
    id: Uuid,
    name: String,
    description: String,
    price: f64,
    stock: i32,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product::from_record(ProductRecord {
            id: ProductId::from_uuid(row.id),
            name: row.name,
            description: row.description,
            price: row.price,
            stock: row.stock,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn find_by_id(&self, id: ProductId) -> CatalogResult<Option<Product>> {
        debug!("Finding product by id: {}", id);

        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT id, name, description, price, stock, created_at, updated_at
            FROM products
            WHERE id = $1
            "#,
        )
        .bind(id.into_inner())
        .fetch_optional(self.pool.inner())
        .await?;

        Ok(row.map(Product::from))
    }

    async fn find_all(&self) -> CatalogResult<Vec<Product>> {
        debug!("Loading all products");

        let rows = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT id, name, description, price, stock, created_at, updated_at
            FROM products
            ORDER BY created_at, id
            "#,
        )
        .fetch_all(self.pool.inner())
        .await?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    async fn create(&self, product: &Product) -> CatalogResult<Product> {
        debug!("Creating product: {}", product.id());

        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            INSERT INTO products (id, name, description, price, stock, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, name, description, price, stock, created_at, updated_at
            "#,
        )
        .bind(product.id().into_inner())
        .bind(product.name())
        .bind(product.description())
        .bind(product.price())
        .bind(product.stock())
        .bind(product.created_at())
        .bind(product.updated_at())
        .fetch_one(self.pool.inner())
        .await?;

        Ok(row.into())
    }

    async fn update(&self, product: &Product) -> CatalogResult<bool> {
        debug!("Updating product: {}", product.id());

        let result = sqlx::query(
            r#"
            UPDATE products
            SET name = $2, description = $3, price = $4, stock = $5, updated_at = $6
            WHERE id = $1
            "#,
        )
        .bind(product.id().into_inner())
        .bind(product.name())
        .bind(product.description())
        .bind(product.price())
        .bind(product.stock())
        .bind(product.updated_at())
        .execute(self.pool.inner())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: ProductId) -> CatalogResult<bool> {
        debug!("Deleting product: {}", id);

        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id.into_inner())
            .execute(self.pool.inner())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> CatalogResult<u64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM products")
            .fetch_one(self.pool.inner())
            .await?;

        Ok(u64::try_from(count.0).unwrap_or_default())
    }
}
