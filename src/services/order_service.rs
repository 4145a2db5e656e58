use crate::{
    dto::orders::CreateOrderRequest,
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::Order,
    state::AppState,
};

pub async fn list_orders(state: &AppState, user: &AuthUser) -> AppResult<Vec<Order>> {
    Ok(state.store.list_orders(user.user_id).await)
}

pub async fn create_order(
    state: &AppState,
    user: &AuthUser,
    payload: CreateOrderRequest,
) -> AppResult<Order> {
    if payload.user_id != user.user_id {
        return Err(AppError::invalid(
            "userId",
            "userId does not match the signed-in user",
        ));
    }

    let order = state
        .store
        .insert_order(
            user.user_id,
            payload.total.trim().to_string(),
            payload.status,
            payload.items,
        )
        .await;

    tracing::info!(
        order_id = order.id,
        user_id = user.user_id,
        total = %order.total,
        "order created"
    );
    Ok(order)
}
