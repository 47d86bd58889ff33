//! Error types for the gateway
//!
//! Every failure a caller can observe is rendered as `{ "error": "<message>" }`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Application-level errors
#[derive(Debug, Error)]
pub enum AppError {
    /// Caller input rejected before any upstream call
    #[error("{0}")]
    BadRequest(String),

    /// Upstream returned a non-success status, could not be reached, or sent
    /// a body that is not JSON
    #[error("{0}")]
    Upstream(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Map a non-success upstream status, e.g. `Mapbox API error: 404 Not Found`.
    /// Codes without a standard reason phrase render as the bare number.
    pub fn upstream_status(provider: &str, status: reqwest::StatusCode) -> Self {
        let message = match status.canonical_reason() {
            Some(reason) => format!("{} API error: {} {}", provider, status.as_u16(), reason),
            None => format!("{} API error: {}", provider, status.as_u16()),
        };
        AppError::Upstream(message)
    }

    /// Map a transport or decoding failure. The request URL is dropped because
    /// it carries the upstream credential.
    pub fn upstream_transport(provider: &str, err: reqwest::Error) -> Self {
        AppError::Upstream(format!(
            "{} request failed: {}",
            provider,
            err.without_url()
        ))
    }

    /// HTTP status reported to the caller
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Upstream(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match &self {
            AppError::Internal(_) => "Internal server error".to_string(),
            other => other.to_string(),
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;
