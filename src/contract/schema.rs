use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use thiserror::Error;

use crate::{
    dto::{
        auth::{AuthResponse, GoogleLoginRequest, LoginRequest, SignupRequest},
        errors::{InternalErrorBody, NotFoundBody, ValidationErrorBody},
        favorites::{FavoriteToggle, ToggleFavoriteRequest},
        orders::CreateOrderRequest,
        reviews::CreateReviewRequest,
    },
    models::{Favorite, Order, Product, Review, User},
    validation::{Validate, ValidationError},
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// The payload does not have the structure of the schema's type.
    #[error("{schema}: {message}")]
    Shape {
        schema: &'static str,
        message: String,
    },

    /// Structurally fine, but a field rule failed.
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error("{schema}: expected an empty body")]
    UnexpectedBody { schema: &'static str },

    #[error("{operation} declares no response for status {status}")]
    UndeclaredStatus { operation: &'static str, status: u16 },

    #[error("{operation} takes no input")]
    NoInput { operation: &'static str },
}

/// Every payload shape the registry refers to.
///
/// Each variant stands for one Rust type; a JSON value matches the schema when
/// it deserializes into that type and passes the type's [`Validate`] rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Schema {
    User,
    AuthResponse,
    Product,
    ProductList,
    Favorite,
    FavoriteList,
    FavoriteToggle,
    Review,
    ReviewList,
    Order,
    OrderList,
    SignupInput,
    LoginInput,
    GoogleLoginInput,
    ToggleFavoriteInput,
    CreateReviewInput,
    CreateOrderInput,
    ValidationError,
    NotFound,
    InternalError,
    /// No body at all (`null` when read back as JSON).
    Empty,
}

impl Schema {
    pub fn name(&self) -> &'static str {
        match self {
            Schema::User => "User",
            Schema::AuthResponse => "AuthResponse",
            Schema::Product => "Product",
            Schema::ProductList => "Product[]",
            Schema::Favorite => "Favorite",
            Schema::FavoriteList => "Favorite[]",
            Schema::FavoriteToggle => "FavoriteToggle",
            Schema::Review => "Review",
            Schema::ReviewList => "Review[]",
            Schema::Order => "Order",
            Schema::OrderList => "Order[]",
            Schema::SignupInput => "SignupRequest",
            Schema::LoginInput => "LoginRequest",
            Schema::GoogleLoginInput => "GoogleLoginRequest",
            Schema::ToggleFavoriteInput => "ToggleFavoriteRequest",
            Schema::CreateReviewInput => "CreateReviewRequest",
            Schema::CreateOrderInput => "CreateOrderRequest",
            Schema::ValidationError => "ValidationError",
            Schema::NotFound => "NotFoundError",
            Schema::InternalError => "InternalError",
            Schema::Empty => "Empty",
        }
    }

    pub fn check(&self, value: &Value) -> Result<(), SchemaError> {
        self.round_trip(value).map(drop)
    }

    /// Decodes `value` as the schema's type, validates it, and encodes it back.
    ///
    /// Defaulted fields come back filled in and `User.password` never comes
    /// back, since it is not serialized.
    pub fn round_trip(&self, value: &Value) -> Result<Value, SchemaError> {
        match self {
            Schema::User => self.reencode::<User>(value),
            Schema::AuthResponse => self.reencode::<AuthResponse>(value),
            Schema::Product => self.reencode::<Product>(value),
            Schema::ProductList => self.reencode::<Vec<Product>>(value),
            Schema::Favorite => self.reencode::<Favorite>(value),
            Schema::FavoriteList => self.reencode::<Vec<Favorite>>(value),
            Schema::FavoriteToggle => self.reencode::<FavoriteToggle>(value),
            Schema::Review => self.reencode::<Review>(value),
            Schema::ReviewList => self.reencode::<Vec<Review>>(value),
            Schema::Order => self.reencode::<Order>(value),
            Schema::OrderList => self.reencode::<Vec<Order>>(value),
            Schema::SignupInput => self.reencode::<SignupRequest>(value),
            Schema::LoginInput => self.reencode::<LoginRequest>(value),
            Schema::GoogleLoginInput => self.reencode::<GoogleLoginRequest>(value),
            Schema::ToggleFavoriteInput => self.reencode::<ToggleFavoriteRequest>(value),
            Schema::CreateReviewInput => self.reencode::<CreateReviewRequest>(value),
            Schema::CreateOrderInput => self.reencode::<CreateOrderRequest>(value),
            Schema::ValidationError => self.reencode::<ValidationErrorBody>(value),
            Schema::NotFound => self.reencode::<NotFoundBody>(value),
            Schema::InternalError => self.reencode::<InternalErrorBody>(value),
            Schema::Empty => match value {
                Value::Null => Ok(Value::Null),
                _ => Err(SchemaError::UnexpectedBody {
                    schema: self.name(),
                }),
            },
        }
    }

    fn reencode<T>(&self, value: &Value) -> Result<Value, SchemaError>
    where
        T: DeserializeOwned + Serialize + Validate,
    {
        let shape = |err: serde_json::Error| SchemaError::Shape {
            schema: self.name(),
            message: err.to_string(),
        };
        let parsed: T = serde_json::from_value(value.clone()).map_err(shape)?;
        parsed.validate()?;
        serde_json::to_value(&parsed).map_err(shape)
    }
}
