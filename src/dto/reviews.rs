use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    entity::reviews::{MAX_COMMENT_CHARS, MAX_RATING, MIN_RATING},
    validation::{self, Validate, ValidationError},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CreateReviewRequest {
    pub rating: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl Validate for CreateReviewRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        validation::in_range("rating", self.rating, MIN_RATING..=MAX_RATING)?;
        if let Some(comment) = &self.comment {
            validation::max_chars("comment", comment, MAX_COMMENT_CHARS)?;
        }
        Ok(())
    }
}
