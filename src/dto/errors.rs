use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::validation::{Validate, ValidationError};

/// Body of every 400 and 401 response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ValidationErrorBody {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct NotFoundBody {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct InternalErrorBody {
    pub message: String,
}

impl Validate for ValidationErrorBody {
    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }
}

impl Validate for NotFoundBody {
    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }
}

impl Validate for InternalErrorBody {
    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }
}
