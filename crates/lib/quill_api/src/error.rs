//! Application error types and their HTTP mapping.
//!
//! Every failure in the request pipeline ends up as an `AppError`. Business
//! failures share one shape, `400 {"error": "<message>"}`; only unexpected
//! errors produce a 500, with the detail logged and never returned.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use quill_core::auth::AuthError;
use quill_core::store::StoreError;
use thiserror::Error;
use tracing::error;

use crate::models::ErrorResponse;

/// Convenience alias for handler return types.
pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    /// Missing or malformed input.
    #[error("{0}")]
    Validation(String),

    /// Missing, invalid or expired credentials.
    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    NotFound(String),

    /// Unique constraint rejected a write; holds the offending columns.
    #[error("{} already exists", .0.join(""))]
    Conflict(Vec<String>),

    #[error("Internal server error")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation(_)
            | AppError::Unauthorized(_)
            | AppError::NotFound(_)
            | AppError::Conflict(_) => {
                let body = Json(ErrorResponse {
                    error: self.to_string(),
                });
                (StatusCode::BAD_REQUEST, body).into_response()
            }
            AppError::Internal(detail) => {
                error!(%detail, "unhandled error");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::UniqueViolation { fields } if fields.is_empty() => {
                AppError::Conflict(vec!["record".into()])
            }
            StoreError::UniqueViolation { fields } => AppError::Conflict(fields),
            StoreError::ForeignKeyViolation(_) => AppError::Validation("Author not found".into()),
            StoreError::Db(e) => AppError::Internal(e.to_string()),
        }
    }
}

impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::TokenError(msg) => AppError::Unauthorized(msg),
            AuthError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}
