// ABOUTME: Error type returned by every HTTP handler
// ABOUTME: Maps domain errors to status codes and a sanitized JSON error body

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use quill_security::LoginFailure;
use quill_storage::StorageError;
use serde::Serialize;
use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    #[error("Forbidden: {message}")]
    Forbidden { message: String },

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Request body too large")]
    PayloadTooLarge,

    #[error("Storage error")]
    Storage(#[from] StorageError),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

/// Structured error response format for API consistency
#[derive(Serialize)]
struct ErrorResponse {
    success: bool,
    error: ErrorDetail,
    request_id: String,
}

#[derive(Serialize)]
struct ErrorDetail {
    code: String,
    message: String,
}

impl ApiError {
    fn to_status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            ApiError::Unauthorized { .. } => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            ApiError::Forbidden { .. } => (StatusCode::FORBIDDEN, "FORBIDDEN"),
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::Conflict(_) => (StatusCode::CONFLICT, "CONFLICT"),
            ApiError::PayloadTooLarge => (StatusCode::PAYLOAD_TOO_LARGE, "PAYLOAD_TOO_LARGE"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
            ApiError::Storage(storage_error) => match storage_error {
                StorageError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
                StorageError::Duplicate(_) => (StatusCode::CONFLICT, "CONFLICT"),
                StorageError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
                _ => (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR"),
            },
        }
    }

    /// User-facing message; internal details never leave the server
    fn to_user_message(&self) -> String {
        match self {
            ApiError::Validation(msg) => msg.clone(),
            ApiError::Unauthorized { message } => message.clone(),
            ApiError::Forbidden { message } => message.clone(),
            ApiError::NotFound(resource) => format!("{} not found", resource),
            ApiError::Conflict(msg) => msg.clone(),
            ApiError::PayloadTooLarge => "Request body too large".to_string(),
            ApiError::Internal(_) => "An internal server error occurred".to_string(),
            ApiError::Storage(storage_error) => match storage_error {
                StorageError::NotFound(_)
                | StorageError::Duplicate(_)
                | StorageError::Validation(_) => storage_error.to_string(),
                _ => "Data storage error".to_string(),
            },
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    pub fn login_required() -> Self {
        Self::unauthorized("Authentication required")
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden {
            message: message.into(),
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn internal(err: impl Into<anyhow::Error>) -> Self {
        Self::Internal(err.into())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            Self::PayloadTooLarge
        } else {
            Self::validation(rejection.body_text())
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        // Missing path params mean the route and handler disagree
        if rejection.status().is_server_error() {
            Self::internal(anyhow::anyhow!(rejection.body_text()))
        } else {
            Self::validation(rejection.body_text())
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::validation(rejection.body_text())
    }
}

impl From<LoginFailure> for ApiError {
    fn from(err: LoginFailure) -> Self {
        match err {
            LoginFailure::Storage(storage_error) => Self::Storage(storage_error),
            failure => Self::unauthorized(failure.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let request_id = Uuid::new_v4().to_string();
        let (status_code, error_code) = self.to_status_and_code();
        let user_message = self.to_user_message();

        match &self {
            ApiError::Internal(err) => {
                error!(
                    request_id = %request_id,
                    error = %err,
                    "Internal server error occurred"
                );
            }
            ApiError::Storage(storage_error) if status_code.is_server_error() => {
                error!(
                    request_id = %request_id,
                    storage_error = %storage_error,
                    "Storage system error"
                );
            }
            ApiError::Forbidden { message } => {
                warn!(
                    request_id = %request_id,
                    reason = %message,
                    audit = true,
                    "Access denied"
                );
            }
            _ => {
                info!(
                    request_id = %request_id,
                    error_code = %error_code,
                    error = %self,
                    "API error response"
                );
            }
        }

        let body = ErrorResponse {
            success: false,
            error: ErrorDetail {
                code: error_code.to_string(),
                message: user_message,
            },
            request_id,
        };

        (status_code, Json(body)).into_response()
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use quill_core::ValidationError;

    #[test]
    fn test_storage_errors_map_to_client_statuses() {
        let not_found = ApiError::from(StorageError::NotFound("Post"));
        assert_eq!(
            not_found.to_status_and_code(),
            (StatusCode::NOT_FOUND, "NOT_FOUND")
        );
        assert_eq!(not_found.to_user_message(), "Post not found");

        let duplicate = ApiError::from(StorageError::Duplicate("taken".to_string()));
        assert_eq!(
            duplicate.to_status_and_code(),
            (StatusCode::CONFLICT, "CONFLICT")
        );
        assert_eq!(duplicate.to_user_message(), "taken");

        let invalid = ApiError::from(StorageError::Validation(ValidationError::InvalidEmail));
        assert_eq!(invalid.to_status_and_code().0, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_login_failures_are_unauthorized() {
        let unknown = ApiError::from(LoginFailure::UnknownEmail);
        assert_eq!(unknown.to_status_and_code().0, StatusCode::UNAUTHORIZED);
        assert_eq!(
            unknown.to_user_message(),
            "That email does not exist, please try again."
        );

        let wrong = ApiError::from(LoginFailure::WrongPassword);
        assert_eq!(
            wrong.to_user_message(),
            "Password incorrect, please try again."
        );
    }

    #[test]
    fn test_user_message_sanitization() {
        let internal = ApiError::internal(anyhow::anyhow!("disk on fire at /var/secret"));
        assert_eq!(internal.to_user_message(), "An internal server error occurred");

        let storage = ApiError::from(StorageError::PasswordHash("secret detail".to_string()));
        assert_eq!(
            storage.to_status_and_code(),
            (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR")
        );
        assert!(!storage.to_user_message().contains("secret"));
    }
}
