//! Wire types of the marketplace API.
//!
//! Each record type is the entity model itself, so a payload and its table
//! definition cannot drift apart.

use crate::{
    entity::reviews::{MAX_COMMENT_CHARS, MAX_RATING, MIN_RATING},
    validation::{self, Validate, ValidationError},
};

pub use crate::entity::favorites::Model as Favorite;
pub use crate::entity::orders::{Model as Order, OrderStatus};
pub use crate::entity::products::{Model as Product, ProductCondition};
pub use crate::entity::reviews::Model as Review;
pub use crate::entity::users::Model as User;

impl Validate for User {
    fn validate(&self) -> Result<(), ValidationError> {
        validation::non_empty("username", &self.username)?;
        validation::non_empty("name", &self.name)
    }
}

impl Validate for Product {
    fn validate(&self) -> Result<(), ValidationError> {
        validation::non_empty("title", &self.title)?;
        validation::decimal_text("price", &self.price)?;
        validation::decimal_text("sellerRating", &self.seller_rating)
    }
}

impl Validate for Order {
    fn validate(&self) -> Result<(), ValidationError> {
        validation::decimal_text("total", &self.total)
    }
}

impl Validate for Favorite {
    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }
}

impl Validate for Review {
    fn validate(&self) -> Result<(), ValidationError> {
        validation::in_range("rating", self.rating, MIN_RATING..=MAX_RATING)?;
        if let Some(comment) = &self.comment {
            validation::max_chars("comment", comment, MAX_COMMENT_CHARS)?;
        }
        Ok(())
    }
}
