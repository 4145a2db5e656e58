use crate::{
    dto::reviews::CreateReviewRequest,
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::Review,
    state::AppState,
    store::StoreError,
};

fn store_error(err: StoreError) -> AppError {
    match err {
        StoreError::UnknownProduct => AppError::NotFound("Product"),
        other => AppError::Internal(anyhow::anyhow!(other)),
    }
}

pub async fn list_for_product(state: &AppState, product_id: i32) -> AppResult<Vec<Review>> {
    state
        .store
        .list_reviews(product_id)
        .await
        .map_err(store_error)
}

pub async fn create_review(
    state: &AppState,
    user: &AuthUser,
    product_id: i32,
    payload: CreateReviewRequest,
) -> AppResult<Review> {
    let comment = payload
        .comment
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty());

    let review = state
        .store
        .insert_review(product_id, user.user_id, payload.rating, comment)
        .await
        .map_err(store_error)?;

    tracing::info!(review_id = review.id, product_id, "review created");
    Ok(review)
}
