use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde_json::Value;

use crate::{
    contract,
    dto::{
        errors::{NotFoundBody, ValidationErrorBody},
        favorites::{FavoriteToggle, ToggleFavoriteRequest},
    },
    error::AppResult,
    middleware::auth::AuthUser,
    models::Favorite,
    routes::decode_body,
    services::favorite_service,
    state::AppState,
};

#[utoipa::path(
    get,
    path = "/api/favorites",
    responses(
        (status = 200, description = "The signed-in user's favorites", body = Vec<Favorite>),
        (status = 401, description = "Not signed in", body = ValidationErrorBody)
    ),
    security(("session_cookie" = []), ("bearer_auth" = [])),
    tag = "Favorites"
)]
pub async fn list_favorites(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<Vec<Favorite>>> {
    let favorites = favorite_service::list_favorites(&state, &user).await?;
    Ok(Json(favorites))
}

#[utoipa::path(
    post,
    path = "/api/favorites",
    request_body = ToggleFavoriteRequest,
    responses(
        (status = 200, description = "Favorite added or removed", body = FavoriteToggle),
        (status = 400, description = "Invalid input", body = ValidationErrorBody),
        (status = 401, description = "Not signed in", body = ValidationErrorBody),
        (status = 404, description = "Product not found", body = NotFoundBody)
    ),
    security(("session_cookie" = []), ("bearer_auth" = [])),
    tag = "Favorites"
)]
pub async fn toggle_favorite(
    State(state): State<AppState>,
    user: AuthUser,
    body: Result<Json<Value>, JsonRejection>,
) -> AppResult<Json<FavoriteToggle>> {
    let payload: ToggleFavoriteRequest = decode_body(&contract::favorites::TOGGLE, body)?;
    let toggled = favorite_service::toggle_favorite(&state, &user, payload).await?;
    Ok(Json(toggled))
}
