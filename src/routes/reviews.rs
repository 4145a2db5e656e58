use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
};
use serde_json::Value;

use crate::{
    contract,
    dto::{
        errors::{NotFoundBody, ValidationErrorBody},
        reviews::CreateReviewRequest,
    },
    error::AppResult,
    middleware::auth::AuthUser,
    models::Review,
    routes::{decode_body, path_id},
    services::review_service,
    state::AppState,
};

#[utoipa::path(
    get,
    path = "/api/products/{id}/reviews",
    params(
        ("id" = i32, Path, description = "Product id")
    ),
    responses(
        (status = 200, description = "Reviews of the product", body = Vec<Review>),
        (status = 404, description = "Product not found", body = NotFoundBody)
    ),
    tag = "Reviews"
)]
pub async fn list_for_product(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> AppResult<Json<Vec<Review>>> {
    let product_id = path_id(path, "Product")?;
    let reviews = review_service::list_for_product(&state, product_id).await?;
    Ok(Json(reviews))
}

#[utoipa::path(
    post,
    path = "/api/products/{id}/reviews",
    params(
        ("id" = i32, Path, description = "Product id")
    ),
    request_body = CreateReviewRequest,
    responses(
        (status = 201, description = "Review created", body = Review),
        (status = 400, description = "Invalid input", body = ValidationErrorBody),
        (status = 401, description = "Not signed in", body = ValidationErrorBody),
        (status = 404, description = "Product not found", body = NotFoundBody)
    ),
    security(("session_cookie" = []), ("bearer_auth" = [])),
    tag = "Reviews"
)]
pub async fn create_review(
    State(state): State<AppState>,
    user: AuthUser,
    path: Result<Path<i32>, PathRejection>,
    body: Result<Json<Value>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Review>)> {
    let product_id = path_id(path, "Product")?;
    let payload: CreateReviewRequest = decode_body(&contract::reviews::CREATE, body)?;
    let review = review_service::create_review(&state, &user, product_id, payload).await?;
    Ok((StatusCode::CREATED, Json(review)))
}
