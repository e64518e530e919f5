// Error handling types for the API

use axum::{http::StatusCode, response::IntoResponse, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::error;

use super::validation::FieldError;

/// Structured body carried by an invalid payload error
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub status: u16,
    pub message: String,
    pub sub_errors: Vec<FieldError>,
    pub timestamp: String,
}

impl ApiErrorBody {
    pub fn bad_request(message: &str, sub_errors: Vec<FieldError>, at: DateTime<Utc>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST.as_u16(),
            message: message.to_string(),
            sub_errors,
            timestamp: at.to_rfc3339(),
        }
    }
}

/// API error types
#[derive(Debug)]
pub enum ApiError {
    Unauthorized(String),
    Forbidden(String),
    BadRequest(String),
    NotFound(String),
    InternalServer(String),
    DatabaseError(sqlx::Error),
    ValidationError(String),
    InvalidPayload(ApiErrorBody),
}

impl ApiError {
    /// Wraps accumulated field errors into a hard failure stamped at `at`
    pub fn invalid_payload(sub_errors: Vec<FieldError>, at: DateTime<Utc>) -> Self {
        ApiError::InvalidPayload(ApiErrorBody::bad_request(
            "Payload contains invalid data.",
            sub_errors,
            at,
        ))
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            ApiError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            ApiError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            ApiError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            ApiError::InternalServer(msg) => write!(f, "Internal Server Error: {}", msg),
            ApiError::DatabaseError(e) => write!(f, "Database Error: {}", e),
            ApiError::ValidationError(msg) => write!(f, "Validation Error: {}", msg),
            ApiError::InvalidPayload(body) => write!(f, "Invalid Payload: {}", body.message),
        }
    }
}

impl std::error::Error for ApiError {}

/// JSON error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, error_message, code) = match self {
            ApiError::InvalidPayload(body) => {
                return (StatusCode::BAD_REQUEST, Json(body)).into_response();
            }
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg, "UNAUTHORIZED"),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg, "FORBIDDEN"),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg, "BAD_REQUEST"),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, "NOT_FOUND"),
            ApiError::InternalServer(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                msg,
                "INTERNAL_SERVER_ERROR",
            ),
            ApiError::DatabaseError(e) => {
                error!(error = %e, "Database error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database operation failed".to_string(),
                    "DATABASE_ERROR",
                )
            }
            ApiError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg, "VALIDATION_ERROR"),
        };

        let error_response = ErrorResponse {
            error: error_message,
            code: code.to_string(),
        };

        (status, Json(error_response)).into_response()
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(e: sqlx::Error) -> Self {
        ApiError::DatabaseError(e)
    }
}
