//! Product controller (API v1).
//!
//! Also mounted without a version prefix at `/api/products`.

use super::parse_product_id;
use crate::{
    extractors::ValidatedJson,
    responses::{created, no_content, ok, product_not_found, ApiResult, AppError},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Response,
    routing::get,
    Router,
};
use catalog_service::{CreateProductRequest, ProductResponse, UpdateProductRequest};
use tracing::debug;

/// Creates the v1 product router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route("/:id", get(get_product).put(update_product).delete(delete_product))
}

/// Location of a product resource.
pub fn product_location(id: impl std::fmt::Display) -> String {
    format!("/api/v1/products/{}", id)
}

/// List all products.
#[utoipa::path(
    get,
    path = "/api/v1/products",
    tag = "products",
    responses(
        (status = 200, description = "All products in creation order", body = [ProductResponse])
    )
)]
pub async fn list_products(State(state): State<AppState>) -> ApiResult<Vec<ProductResponse>> {
    debug!("List products request");

    let products = state.product_service.get_all().await?;
    ok(products)
}

/// Get a product by ID.
#[utoipa::path(
    get,
    path = "/api/v1/products/{id}",
    tag = "products",
    params(("id" = String, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product found", body = ProductResponse),
        (status = 400, description = "Malformed product ID"),
        (status = 404, description = "Product not found")
    )
)]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<ProductResponse> {
    debug!("Get product request: {}", id);

    let product_id = parse_product_id(&id)?;
    let product = state
        .product_service
        .get_by_id(product_id)
        .await?
        .ok_or_else(|| product_not_found(product_id))?;

    ok(product)
}

/// Create a product.
#[utoipa::path(
    post,
    path = "/api/v1/products",
    tag = "products",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created", body = ProductResponse,
            headers(("location" = String, description = "URL of the new product"))),
        (status = 400, description = "Invalid request body")
    )
)]
pub async fn create_product(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateProductRequest>,
) -> Result<Response, AppError> {
    debug!("Create product request: {}", request.name);

    let product = state.product_service.create(request).await?;
    Ok(created(product_location(product.id), product))
}

/// Update a product. Absent fields keep their current value.
#[utoipa::path(
    put,
    path = "/api/v1/products/{id}",
    tag = "products",
    params(("id" = String, Path, description = "Product ID")),
    request_body = UpdateProductRequest,
    responses(
        (status = 204, description = "Product updated"),
        (status = 400, description = "Malformed product ID or invalid request body"),
        (status = 404, description = "Product not found")
    )
)]
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateProductRequest>,
) -> Result<StatusCode, AppError> {
    debug!("Update product request: {}", id);

    let product_id = parse_product_id(&id)?;
    if !state.product_service.update(product_id, request).await? {
        return Err(product_not_found(product_id));
    }

    Ok(no_content())
}

/// Delete a product.
#[utoipa::path(
    delete,
    path = "/api/v1/products/{id}",
    tag = "products",
    params(("id" = String, Path, description = "Product ID")),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 400, description = "Malformed product ID"),
        (status = 404, description = "Product not found")
    )
)]
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    debug!("Delete product request: {}", id);

    let product_id = parse_product_id(&id)?;
    if !state.product_service.delete(product_id).await? {
        return Err(product_not_found(product_id));
    }

    Ok(no_content())
}
