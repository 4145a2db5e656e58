use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use serde_json::Value;

use crate::{
    contract,
    dto::{errors::ValidationErrorBody, orders::CreateOrderRequest},
    error::AppResult,
    middleware::auth::AuthUser,
    models::Order,
    routes::decode_body,
    services::order_service,
    state::AppState,
};

#[utoipa::path(
    get,
    path = "/api/orders",
    responses(
        (status = 200, description = "The signed-in user's orders, newest first", body = Vec<Order>),
        (status = 401, description = "Not signed in", body = ValidationErrorBody)
    ),
    security(("session_cookie" = []), ("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn list_orders(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<Vec<Order>>> {
    let orders = order_service::list_orders(&state, &user).await?;
    Ok(Json(orders))
}

#[utoipa::path(
    post,
    path = "/api/orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order placed", body = Order),
        (status = 400, description = "Invalid input", body = ValidationErrorBody),
        (status = 401, description = "Not signed in", body = ValidationErrorBody)
    ),
    security(("session_cookie" = []), ("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn create_order(
    State(state): State<AppState>,
    user: AuthUser,
    body: Result<Json<Value>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Order>)> {
    let payload: CreateOrderRequest = decode_body(&contract::orders::CREATE, body)?;
    let order = order_service::create_order(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(order)))
}
