//! Application error types.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use iam_core::auth::AuthError;
use iam_core::store::StoreError;
use thiserror::Error;
use tracing::error;

use crate::models::ErrorResponse;

/// Convenience alias for handler return types.
pub type AppResult<T> = Result<T, AppError>;

/// Application-level errors with HTTP status mapping.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Internal server error")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, message) = match &self {
            AppError::Validation(m) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "validation_error",
                m.as_str(),
            ),
            AppError::Conflict(m) => (StatusCode::CONFLICT, "conflict", m.as_str()),
            AppError::NotFound(m) => (StatusCode::NOT_FOUND, "not_found", m.as_str()),
            AppError::Unauthorized(m) => (StatusCode::UNAUTHORIZED, "unauthorized", m.as_str()),
            AppError::Internal(detail) => {
                error!(detail = %detail, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "Internal server error",
                )
            }
        };
        let body = Json(ErrorResponse {
            error: error.to_string(),
            message: message.to_string(),
        });
        (status, body).into_response()
    }
}

impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::PasswordMismatch | AuthError::PasswordTooLong => {
                AppError::Validation(e.to_string())
            }
            AuthError::EmailExists => AppError::Conflict(e.to_string()),
            AuthError::NotFound => AppError::NotFound(e.to_string()),
            AuthError::InvalidCredentials | AuthError::InvalidToken => {
                AppError::Unauthorized(e.to_string())
            }
            AuthError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        AppError::from(AuthError::from(e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(e: AppError) -> StatusCode {
        e.into_response().status()
    }

    #[test]
    fn auth_errors_map_to_status_codes() {
        assert_eq!(status_of(AuthError::EmailExists.into()), StatusCode::CONFLICT);
        assert_eq!(
            status_of(AuthError::PasswordMismatch.into()),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            status_of(AuthError::InvalidCredentials.into()),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_of(AuthError::InvalidToken.into()),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(status_of(AuthError::NotFound.into()), StatusCode::NOT_FOUND);
        assert_eq!(
            status_of(AuthError::Internal("x".into()).into()),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn store_errors_map_to_status_codes() {
        assert_eq!(
            status_of(StoreError::AlreadyExists("a@b.com".into()).into()),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(StoreError::NotFound("id".into()).into()),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(StoreError::PasswordTooLong.into()),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn invalid_token_message_is_generic() {
        match AppError::from(AuthError::InvalidToken) {
            AppError::Unauthorized(msg) => assert_eq!(msg, "Invalid or expired token"),
            other => panic!("unexpected: {other:?}"),
        }
    }
}
