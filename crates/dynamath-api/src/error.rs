//! Dynamath: API error types.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use dynamath_core::error::GenerationError;
use serde::Serialize;
use thiserror::Error;

/// Startup errors for the API server.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required environment variable is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// The built-in template registry could not be assembled.
    #[error("registry error: {0}")]
    Registry(#[from] GenerationError),

    /// Network binding or I/O error.
    #[error("server error: {0}")]
    Server(#[from] std::io::Error),
}

/// JSON body returned for error responses.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Machine-readable error code.
    pub error: &'static str,
    /// Human-readable error message.
    pub message: String,
}

/// HTTP-layer error that implements `IntoResponse`.
#[derive(Debug)]
pub enum ApiError {
    /// A generation, registry or seed error.
    Generation(GenerationError),
    /// The template exists but offers no self-check.
    NoValidator(String),
}

impl From<GenerationError> for ApiError {
    fn from(err: GenerationError) -> Self {
        Self::Generation(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self {
            Self::NoValidator(id) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "no_validator",
                format!("template {id} has no validator"),
            ),
            Self::Generation(err) => {
                let (status, code) = match &err {
                    GenerationError::UnknownTemplate(_) => {
                        (StatusCode::NOT_FOUND, "unknown_template")
                    }
                    GenerationError::InvalidRange { .. }
                    | GenerationError::EmptyInput
                    | GenerationError::InvalidId(_)
                    | GenerationError::InvalidSeed(_) => (StatusCode::BAD_REQUEST, "invalid_request"),
                    GenerationError::Evaluation(_) => {
                        (StatusCode::UNPROCESSABLE_ENTITY, "evaluation_error")
                    }
                    GenerationError::InvalidDescriptor(_)
                    | GenerationError::IdMismatch { .. }
                    | GenerationError::Storage(_) => {
                        (StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
                    }
                };
                (status, code, err.to_string())
            }
        };

        let body = ErrorBody {
            error: error_code,
            message,
        };

        (status, Json(body)).into_response()
    }
}
