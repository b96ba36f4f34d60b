// src/errors.rs
// DOCUMENTATION: Custom error types and HTTP responses
// PURPOSE: Centralized error handling for entire application

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use thiserror::Error;

/// Application-specific error types
/// DOCUMENTATION: Each variant maps to appropriate HTTP status code and error response.
/// Supplier failures (ExternalApiError) are absorbed by the supplier and never
/// reach a handler.
#[derive(Error, Debug)]
pub enum TripsError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Not signed in")]
    Unauthorized,

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("External API error: {0}")]
    ExternalApiError(String),

    #[error("Storage error: {0}")]
    StorageError(String),
}

impl TripsError {
    fn code(&self) -> &'static str {
        match self {
            TripsError::NotFound(_) => "NOT_FOUND",
            TripsError::InvalidInput(_) => "INVALID_INPUT",
            TripsError::ValidationError(_) => "VALIDATION_ERROR",
            TripsError::Unauthorized => "UNAUTHORIZED",
            TripsError::InvalidState(_) => "INVALID_STATE",
            TripsError::ExternalApiError(_) => "EXTERNAL_API_ERROR",
            TripsError::StorageError(_) => "STORAGE_ERROR",
        }
    }
}

impl From<std::io::Error> for TripsError {
    fn from(err: std::io::Error) -> Self {
        TripsError::StorageError(err.to_string())
    }
}

impl From<validator::ValidationErrors> for TripsError {
    fn from(err: validator::ValidationErrors) -> Self {
        TripsError::ValidationError(err.to_string())
    }
}

/// Convert TripsError to HTTP response
/// DOCUMENTATION: Maps error types to HTTP status codes and JSON responses
impl ResponseError for TripsError {
    fn error_response(&self) -> HttpResponse {
        let body = json!({
            "error": {
                "code": self.code(),
                "message": self.to_string(),
                "timestamp": chrono::Utc::now().to_rfc3339()
            }
        });

        HttpResponse::build(self.status_code()).json(body)
    }

    fn status_code(&self) -> StatusCode {
        match self {
            TripsError::NotFound(_) => StatusCode::NOT_FOUND,
            TripsError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            TripsError::ValidationError(_) => StatusCode::BAD_REQUEST,
            TripsError::Unauthorized => StatusCode::UNAUTHORIZED,
            TripsError::InvalidState(_) => StatusCode::CONFLICT,
            TripsError::ExternalApiError(_) => StatusCode::BAD_GATEWAY,
            TripsError::StorageError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
