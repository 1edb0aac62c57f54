//! API error type and its HTTP mapping.
//!
//! Every failure answers `{"success": false, "error": msg, "code": CODE}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use reqlens_core::errors::error_code::{self, ReqErrorCode};
use reqlens_core::errors::{ServiceError, StorageError, ValidationError};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),

    /// Validation failure or malformed request body.
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Storage(StorageError),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Storage(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn is_server_error(&self) -> bool {
        self.status_code().is_server_error()
    }
}

impl ReqErrorCode for ApiError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => error_code::NOT_FOUND,
            Self::BadRequest(_) => error_code::VALIDATION_ERROR,
            Self::Storage(e) => e.error_code(),
            Self::Internal(_) => error_code::INTERNAL_ERROR,
        }
    }
}

impl From<StorageError> for ApiError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::NotFound { .. } => Self::NotFound(e.to_string()),
            other => Self::Storage(other),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::BadRequest(e.to_string())
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Validation(v) => v.into(),
            ServiceError::Storage(s) => s.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if self.is_server_error() {
            tracing::error!(code = self.error_code(), error = %self, "request failed");
        } else {
            tracing::debug!(code = self.error_code(), error = %self, "request rejected");
        }
        let body = json!({
            "success": false,
            "error": self.to_string(),
            "code": self.error_code(),
        });
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_error_kind() {
        let nf: ApiError = StorageError::not_found("project", 3).into();
        assert_eq!(nf.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(nf.to_string(), "project 3 not found");

        let bad: ApiError =
            ServiceError::Validation(ValidationError::MissingField { field: "title" }).into();
        assert_eq!(bad.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(bad.error_code(), "VALIDATION_ERROR");

        let busy: ApiError = StorageError::Busy {
            message: "locked".into(),
        }
        .into();
        assert_eq!(busy.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(busy.error_code(), "DB_BUSY");
    }

    #[test]
    fn response_carries_json_body() {
        let response = ApiError::BadRequest("nope".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
