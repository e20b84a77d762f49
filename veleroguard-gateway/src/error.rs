//! Error types for the gateway

use std::net::SocketAddr;

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use veleroguard_core::{ConfigError, ValidationError};

/// Startup and runtime failures of the service itself
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Detector parameters rejected
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Host/port do not form a socket address
    #[error("Invalid listen address: {0}")]
    Address(String),

    /// Listener could not be bound
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    /// IO error while serving
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Request-level errors returned to clients
#[derive(Debug, Error)]
pub enum ApiError {
    /// Reading refused before evaluation
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Timestamp not in an ISO-8601 form we accept
    #[error("Validation error: invalid timestamp '{0}'")]
    InvalidTimestamp(String),

    /// Body is not JSON, not declared as JSON, or missing required fields
    #[error("Invalid payload: {0}")]
    Payload(#[from] JsonRejection),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::Validation(_) | ApiError::InvalidTimestamp(_) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR")
            }
            ApiError::Payload(rejection) => (rejection.status(), "INVALID_PAYLOAD"),
        };

        let error = match &self {
            // body_text carries the serde detail, Display only the category
            ApiError::Payload(rejection) => format!("Invalid payload: {}", rejection.body_text()),
            _ => self.to_string(),
        };

        let body = ErrorResponse {
            error,
            code: code.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Result type alias for gateway operations
pub type GatewayResult<T> = Result<T, GatewayError>;
