use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::validation::{Validate, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ToggleFavoriteRequest {
    pub product_id: i32,
}

impl Validate for ToggleFavoriteRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ToggleStatus {
    Added,
    Removed,
}

/// Outcome of a favorite toggle: `{"status": "added" | "removed"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FavoriteToggle {
    pub status: ToggleStatus,
}

impl Validate for FavoriteToggle {
    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }
}
