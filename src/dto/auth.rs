use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    models::User,
    validation::{self, Validate, ValidationError},
};

pub const MIN_PASSWORD_CHARS: usize = 6;

/// Signup input: the user insert shape without `id` or `role`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub name: String,
    pub campus: Option<String>,
    pub avatar: Option<String>,
}

impl Validate for SignupRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        validation::non_empty("username", &self.username)?;
        validation::email("email", &self.email)?;
        validation::min_chars("password", &self.password, MIN_PASSWORD_CHARS)?;
        validation::non_empty("name", &self.name)?;
        if let Some(campus) = &self.campus {
            validation::non_empty("campus", campus)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl Validate for LoginRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        validation::email("email", &self.email)?;
        validation::min_chars("password", &self.password, MIN_PASSWORD_CHARS)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GoogleLoginRequest {
    pub id_token: String,
}

impl Validate for GoogleLoginRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        validation::non_empty("idToken", &self.id_token)
    }
}

/// Body of a successful login or Google sign-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AuthResponse {
    pub user: User,
}

impl Validate for AuthResponse {
    fn validate(&self) -> Result<(), ValidationError> {
        self.user.validate()
    }
}

/// Claims of the session token issued by the server.
#[derive(Debug, Deserialize, Serialize)]
pub struct Claims {
    pub sub: String,
    pub role: String,
    pub exp: usize,
}

/// The subset of a Google id token the sign-in flow reads.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GoogleClaims {
    pub email: String,
    pub name: Option<String>,
    pub picture: Option<String>,
}
