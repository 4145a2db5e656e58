use axum::{
    Json,
    extract::{Path, Query, State, rejection::PathRejection},
};

use crate::{
    dto::errors::NotFoundBody,
    error::AppResult,
    models::Product,
    routes::{params::ProductQuery, path_id},
    services::product_service,
    state::AppState,
};

#[utoipa::path(
    get,
    path = "/api/products",
    params(ProductQuery),
    responses(
        (status = 200, description = "Listings", body = Vec<Product>)
    ),
    tag = "Products"
)]
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ProductQuery>,
) -> AppResult<Json<Vec<Product>>> {
    let products = product_service::list_products(&state, query).await?;
    Ok(Json(products))
}

#[utoipa::path(
    get,
    path = "/api/products/{id}",
    params(
        ("id" = i32, Path, description = "Product id")
    ),
    responses(
        (status = 200, description = "Listing", body = Product),
        (status = 404, description = "Product not found", body = NotFoundBody)
    ),
    tag = "Products"
)]
pub async fn get_product(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> AppResult<Json<Product>> {
    let id = path_id(path, "Product")?;
    let product = product_service::get_product(&state, id).await?;
    Ok(Json(product))
}
