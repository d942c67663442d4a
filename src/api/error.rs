use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::fmt;

use super::ApiResponse;
use crate::models::catalog::ValidationErrors;
use crate::services::{AuthError, CatalogError, RegistrationError};

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),

    ValidationError(String),

    Conflict(String),

    Unauthorized(String),

    InternalError(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(msg) => write!(f, "Not found: {msg}"),
            Self::ValidationError(msg) => write!(f, "Validation error: {msg}"),
            Self::Conflict(msg) => write!(f, "Conflict: {msg}"),
            Self::Unauthorized(msg) => write!(f, "Unauthorized: {msg}"),
            Self::InternalError(msg) => write!(f, "Internal error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            Self::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            Self::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            Self::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
            Self::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("I'm sorry, but we have encountered the following error: {msg}"),
                )
            }
        };

        let body = ApiResponse::<()>::error(error_message);
        (status, Json(body)).into_response()
    }
}

impl ApiError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationError(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::InternalError(msg.into())
    }

    /// Only the first message is shown to the user.
    fn from_validation(errors: &ValidationErrors) -> Self {
        Self::ValidationError(errors.first().unwrap_or("Invalid input").to_string())
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound(msg) => Self::NotFound(msg),
            CatalogError::Validation(errors) => Self::from_validation(&errors),
            CatalogError::NotAvailable(msg) | CatalogError::Persistence(msg) => {
                Self::InternalError(msg)
            }
        }
    }
}

impl From<RegistrationError> for ApiError {
    fn from(err: RegistrationError) -> Self {
        match err {
            RegistrationError::PasswordMismatch | RegistrationError::MissingField(_) => {
                Self::ValidationError(err.to_string())
            }
            RegistrationError::DuplicateUserName(_) => Self::Conflict(err.to_string()),
            RegistrationError::Persistence(_) => Self::InternalError(err.to_string()),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::UserNotFound(_) | AuthError::IncorrectPassword(_) => {
                Self::Unauthorized("Invalid user name or password".to_string())
            }
            AuthError::Persistence(_) => Self::InternalError(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: ApiError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_catalog_error_statuses() {
        assert_eq!(
            status_of(CatalogError::NotFound("gone".to_string()).into()),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(CatalogError::NotAvailable("down".to_string()).into()),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_validation_shows_first_message() {
        let errors = ValidationErrors::from(vec!["first".to_string(), "second".to_string()]);
        match ApiError::from(CatalogError::Validation(errors)) {
            ApiError::ValidationError(msg) => assert_eq!(msg, "first"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_auth_failures_look_the_same() {
        let unknown = ApiError::from(AuthError::UserNotFound("bob".to_string()));
        let wrong = ApiError::from(AuthError::IncorrectPassword("bob".to_string()));
        assert_eq!(unknown.to_string(), wrong.to_string());
        assert_eq!(status_of(wrong), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_duplicate_user_is_conflict() {
        let err = ApiError::from(RegistrationError::DuplicateUserName("alice".to_string()));
        assert_eq!(status_of(err), StatusCode::CONFLICT);
    }
}
