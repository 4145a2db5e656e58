use crate::{
    dto::favorites::{FavoriteToggle, ToggleFavoriteRequest},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::Favorite,
    state::AppState,
    store::StoreError,
};

pub async fn list_favorites(state: &AppState, user: &AuthUser) -> AppResult<Vec<Favorite>> {
    Ok(state.store.list_favorites(user.user_id).await)
}

pub async fn toggle_favorite(
    state: &AppState,
    user: &AuthUser,
    payload: ToggleFavoriteRequest,
) -> AppResult<FavoriteToggle> {
    let status = state
        .store
        .toggle_favorite(user.user_id, payload.product_id)
        .await
        .map_err(|err| match err {
            StoreError::UnknownProduct => AppError::NotFound("Product"),
            other => AppError::Internal(anyhow::anyhow!(other)),
        })?;

    tracing::debug!(
        user_id = user.user_id,
        product_id = payload.product_id,
        ?status,
        "favorite toggled"
    );
    Ok(FavoriteToggle { status })
}
