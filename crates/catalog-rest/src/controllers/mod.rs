//! REST API controllers.

pub mod health_controller;
pub mod product_controller;
pub mod product_v2_controller;

pub use health_controller::*;

use crate::responses::AppError;
use catalog_core::{CatalogError, ProductId};

/// Parses a product ID path segment; malformed IDs are a validation error.
pub(crate) fn parse_product_id(id: &str) -> Result<ProductId, AppError> {
    ProductId::parse(id)
        .map_err(|_| AppError(CatalogError::validation(format!("Invalid product ID: {}", id))))
}
