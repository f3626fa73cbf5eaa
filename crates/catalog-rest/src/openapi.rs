//! OpenAPI documentation configuration.

use crate::controllers::{DependencyStatus, HealthResponse, ReadinessResponse};
use catalog_core::{ErrorResponse, FieldError, ProductId};
use catalog_service::{
    CreateProductRequest, ProductPageResponse, ProductResponse, UpdateProductRequest,
};
use utoipa::OpenApi;

/// OpenAPI documentation for the catalog API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Catalog Service API",
        version = "2.0.0",
        description = "Product catalog with cache-aside reads",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    paths(
        // Products v1
        crate::controllers::product_controller::list_products,
        crate::controllers::product_controller::get_product,
        crate::controllers::product_controller::create_product,
        crate::controllers::product_controller::update_product,
        crate::controllers::product_controller::delete_product,
        // Products v2
        crate::controllers::product_v2_controller::list_products_paged,
        crate::controllers::product_v2_controller::get_product,
        // Health endpoints
        crate::controllers::health_controller::health_check,
        crate::controllers::health_controller::readiness_check,
        crate::controllers::health_controller::liveness_check,
    ),
    components(
        schemas(
            ProductId,
            ErrorResponse,
            FieldError,
            CreateProductRequest,
            UpdateProductRequest,
            ProductResponse,
            ProductPageResponse,
            HealthResponse,
            DependencyStatus,
            ReadinessResponse,
        )
    ),
    tags(
        (name = "products", description = "Product management (v1)"),
        (name = "products-v2", description = "Paged product listing (v2)"),
        (name = "health", description = "Health check endpoints")
    )
)]
pub struct ApiDoc;
