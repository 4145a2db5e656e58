use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    models::OrderStatus,
    validation::{self, Validate, ValidationError},
};

/// Order insert shape: every order column except the server-assigned `id`
/// and `createdAt`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub user_id: i32,
    pub total: String,
    #[serde(default)]
    pub status: OrderStatus,
    #[schema(value_type = Object)]
    pub items: serde_json::Value,
}

impl Validate for CreateOrderRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        validation::decimal_text("total", &self.total)
    }
}
