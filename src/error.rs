use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::{
    contract::SchemaError,
    dto::errors::{InternalErrorBody, NotFoundBody, ValidationErrorBody},
    validation::ValidationError,
};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{message}")]
    Validation {
        message: String,
        field: Option<String>,
    },

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Internal Server Error")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        AppError::Validation {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    pub fn unauthorized() -> Self {
        AppError::Unauthorized("Not authenticated".into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::Validation {
            message: err.message,
            field: err.field,
        }
    }
}

impl From<SchemaError> for AppError {
    fn from(err: SchemaError) -> Self {
        match err {
            SchemaError::Invalid(invalid) => invalid.into(),
            other => AppError::Validation {
                message: other.to_string(),
                field: None,
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();
        match self {
            AppError::Validation { field, .. } => {
                (status, Json(ValidationErrorBody { message, field })).into_response()
            }
            AppError::Unauthorized(_) => (
                status,
                Json(ValidationErrorBody {
                    message,
                    field: None,
                }),
            )
                .into_response(),
            AppError::NotFound(_) => (status, Json(NotFoundBody { message })).into_response(),
            AppError::Internal(err) => {
                tracing::error!(error = %err, "request failed");
                (
                    status,
                    Json(InternalErrorBody { message }),
                )
                    .into_response()
            }
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
