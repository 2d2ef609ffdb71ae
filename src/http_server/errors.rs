//! # HTTP API Errors
//!
//! Maps store and field errors onto HTTP status codes and a JSON body of the
//! form `{"description": "...", "code": 404}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::observability::Logger;
use crate::schema::FieldError;
use crate::storage::StoreError;

/// Result type for handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// HTTP API errors
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// Referenced element does not exist
    #[error("Element not found")]
    NotFound,

    /// Request body missing, unparseable, or ill-typed
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Store failure
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn log(&self) {
        let message = self.to_string();
        match self {
            ApiError::NotFound => Logger::warn("ELEMENT_NOT_FOUND", &[]),
            ApiError::InvalidInput(_) => Logger::warn("REQUEST_REJECTED", &[("reason", message.as_str())]),
            ApiError::Internal(_) => Logger::error("STORE_FAILURE", &[("reason", message.as_str())]),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(_) => ApiError::NotFound,
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<FieldError> for ApiError {
    fn from(err: FieldError) -> Self {
        ApiError::InvalidInput(err.to_string())
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub description: String,
    pub code: u16,
}

impl From<&ApiError> for ErrorResponse {
    fn from(err: &ApiError) -> Self {
        Self {
            description: err.to_string(),
            code: err.status_code().as_u16(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.log();
        let status = self.status_code();
        let body = Json(ErrorResponse::from(&self));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(ApiError::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::InvalidInput("empty body".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Internal("disk".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_store_error_conversion() {
        assert!(matches!(ApiError::from(StoreError::NotFound(1)), ApiError::NotFound));
        assert!(matches!(ApiError::from(StoreError::Poisoned), ApiError::Internal(_)));
    }

    #[test]
    fn test_error_body() {
        let body = ErrorResponse::from(&ApiError::NotFound);
        assert_eq!(body.description, "Element not found");
        assert_eq!(body.code, 404);
    }
}
