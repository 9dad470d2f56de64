use crate::cache::middleware::{response_cache, ResponseCache};
use crate::handlers::common::{success_response, PaginationParams};
use crate::{
    errors::ApiError,
    models::{ProductDetailResponse, ProductListResponse},
    AppState,
};
use axum::{
    extract::{Path, Query, State},
    middleware,
    response::Response,
    routing::get,
    Router,
};

const LIST_FAILED: &str = "An error occurred while fetching products";
const DETAIL_FAILED: &str = "An error occurred while fetching product details";

/// Product read routes, each response cached per client cookie
pub fn products_routes(cache: ResponseCache) -> Router<AppState> {
    Router::new()
        .route("/products", get(list_products))
        .route("/products/", get(list_products))
        .route("/products/:id", get(get_product))
        .route("/products/:id/", get(get_product))
        .route_layer(middleware::from_fn_with_state(cache, response_cache))
}

/// List products, newest first
#[utoipa::path(
    get,
    path = "/products/",
    params(PaginationParams),
    responses(
        (status = 200, description = "Products fetched", body = ProductListResponse),
        (status = 400, description = "Invalid pagination parameters", body = crate::errors::ErrorResponse),
        (status = 500, description = "Unexpected failure", body = crate::errors::ErrorResponse)
    ),
    tag = "Products"
)]
pub async fn list_products(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<Response, ApiError> {
    let (page, page_size) = params
        .resolve(state.config.default_page_size)
        .map_err(|e| e.with_generic_message(LIST_FAILED))?;

    let listing = state
        .services
        .catalog
        .list_products(page, page_size)
        .await
        .map_err(|e| e.with_generic_message(LIST_FAILED))?;

    Ok(success_response(ProductListResponse {
        status: "success".to_string(),
        message: "Products fetched successfully".to_string(),
        products: listing.products,
        pagination: listing.pagination,
    }))
}

/// Get one product with its images and materials
#[utoipa::path(
    get,
    path = "/products/{id}/",
    params(
        ("id" = String, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product details fetched", body = ProductDetailResponse),
        (status = 404, description = "Product not found", body = crate::errors::ErrorResponse),
        (status = 500, description = "Unexpected failure", body = crate::errors::ErrorResponse)
    ),
    tag = "Products"
)]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let product = state
        .services
        .catalog
        .get_product(&id)
        .await
        .map_err(|e| e.with_generic_message(DETAIL_FAILED))?;

    Ok(success_response(ProductDetailResponse {
        status: "success".to_string(),
        message: "Product details fetched successfully".to_string(),
        product,
    }))
}
