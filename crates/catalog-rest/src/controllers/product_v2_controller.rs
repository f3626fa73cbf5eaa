//! Product controller (API v2): paged listing and lookup by ID.

use super::parse_product_id;
use crate::{
    extractors::PaginationQuery,
    responses::{ok, product_not_found, ApiResult},
    state::AppState,
};
use axum::{
    extract::{Path, Query, State},
    routing::get,
    Router,
};
use catalog_service::{ProductPageResponse, ProductResponse};
use tracing::debug;

/// Creates the v2 product router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_products_paged))
        .route("/:id", get(get_product))
}

/// List products one page at a time.
#[utoipa::path(
    get,
    path = "/api/v2/products",
    tag = "products-v2",
    params(PaginationQuery),
    responses(
        (status = 200, description = "One page of products", body = ProductPageResponse),
        (status = 400, description = "Malformed query parameters")
    )
)]
pub async fn list_products_paged(
    State(state): State<AppState>,
    Query(query): Query<PaginationQuery>,
) -> ApiResult<ProductPageResponse> {
    debug!("List products page request: {:?}", query);

    let page = state.product_service.list_page(query.into()).await?;
    ok(ProductPageResponse::from(page))
}

/// Get a product by ID.
#[utoipa::path(
    get,
    path = "/api/v2/products/{id}",
    tag = "products-v2",
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
    debug!("Get product request (v2): {}", id);

    let product_id = parse_product_id(&id)?;
    let product = state
        .product_service
        .get_by_id(product_id)
        .await?
        .ok_or_else(|| product_not_found(product_id))?;

    ok(product)
}
