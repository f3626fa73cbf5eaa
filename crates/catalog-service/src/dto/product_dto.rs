//! Product DTOs.

use catalog_core::rules::{not_blank, positive_price};
use catalog_core::{Page, ProductId};
use catalog_domain::Product;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Request to create a new product.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateProductRequest {
    #[validate(custom(function = "not_blank", message = "Name cannot be empty"))]
    #[schema(example = "Laptop")]
    pub name: String,

    #[serde(default)]
    #[schema(example = "High-performance laptop")]
    pub description: String,

    #[validate(custom(function = "positive_price", message = "Price must be greater than zero"))]
    #[schema(example = 1299.99)]
    pub price: f64,

    #[validate(range(min = 0, message = "Stock cannot be negative"))]
    #[schema(example = 10)]
    pub stock: i32,
}

/// Request to update a product. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateProductRequest {
    #[validate(custom(function = "not_blank", message = "Name cannot be empty"))]
    pub name: Option<String>,

    pub description: Option<String>,

    #[validate(custom(function = "positive_price", message = "Price must be greater than zero"))]
    pub price: Option<f64>,

    #[validate(range(min = 0, message = "Stock cannot be negative"))]
    pub stock: Option<i32>,
}

/// Product response DTO. This is also the projection held by the cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductResponse {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub stock: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<&Product> for ProductResponse {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id(),
            name: product.name().to_string(),
            description: product.description().to_string(),
            price: product.price(),
            stock: product.stock(),
            created_at: product.created_at(),
            updated_at: product.updated_at(),
        }
    }
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self::from(&product)
    }
}

/// One page of products.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductPageResponse {
    pub items: Vec<ProductResponse>,
    /// Page number, starting at 1.
    pub page: usize,
    pub page_size: usize,
    pub total_count: u64,
    pub total_pages: u64,
}

impl From<Page<ProductResponse>> for ProductPageResponse {
    fn from(page: Page<ProductResponse>) -> Self {
        Self {
            items: page.items,
            page: page.page,
            page_size: page.page_size,
            total_count: page.total_count,
            total_pages: page.total_pages,
        }
    }
}
