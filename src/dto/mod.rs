pub mod auth;
pub mod errors;
pub mod favorites;
pub mod orders;
pub mod reviews;
