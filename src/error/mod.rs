// Error types for the modstudio backend
// Author: kelexine (https://github.com/kelexine)

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

/// Message returned to callers whenever the vision model could not produce an image.
pub const GENERATION_FAILED_DETAIL: &str = "Failed to generate image using AI model";

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("Vision client is not initialized")]
    ClientUnavailable,

    #[error("Image generation failed: {0}")]
    GenerationFailed(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Config parsing error: {0}")]
    ConfigParsing(#[from] config::ConfigError),
}

impl GatewayError {
    /// Short label used for logs and the generation outcome metric.
    pub fn kind(&self) -> &'static str {
        match self {
            GatewayError::InvalidInput(_) => "invalid_input",
            GatewayError::ClientUnavailable => "client_unavailable",
            GatewayError::GenerationFailed(_) => "generation_failed",
            _ => "internal_error",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Text placed in the `detail` field of the JSON error body.
    ///
    /// Provider failures are reported with a generic message; their cause is
    /// only logged. Internal failures carry their detail through to the caller.
    pub fn detail(&self) -> String {
        match self {
            GatewayError::InvalidInput(message) => message.clone(),
            GatewayError::ClientUnavailable | GatewayError::GenerationFailed(_) => {
                GENERATION_FAILED_DETAIL.to_string()
            }
            GatewayError::Internal(detail) => format!("An unexpected error occurred: {}", detail),
            other => format!("An unexpected error occurred: {}", other),
        }
    }
}

// Convert GatewayError to HTTP responses for Axum
impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let body = json!({ "detail": self.detail() });
        (self.status_code(), axum::Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, GatewayError>;
