//! API error types with HTTP status code mapping.
//!
//! [`ApiError`] is the unified error type for all API endpoints. It implements
//! `axum::response::IntoResponse` to produce structured JSON error responses
//! with appropriate HTTP status codes.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use enrichviz_chart::ChartError;
use enrichviz_core::CoreError;
use enrichviz_storage::StorageError;

use crate::request_engine::TransportError;

/// Structured error detail in API responses.
#[derive(Debug, Clone, Serialize)]
pub struct ApiErrorDetail {
    /// Machine-readable error code (e.g., "NOT_FOUND", "BAD_REQUEST").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// API errors with HTTP status code mapping.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Entity not found (404).
    #[error("not found: {0}")]
    NotFound(String),

    /// Invalid request (400).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// The enrichment service failed or rejected the query (502).
    #[error("{message}")]
    Upstream { message: String, cause: String },

    /// Internal server error (500).
    #[error("internal error: {0}")]
    InternalError(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, details) = match &self {
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND", None),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", None),
            ApiError::Upstream { cause, .. } => (
                StatusCode::BAD_GATEWAY,
                "UPSTREAM_FAILED",
                Some(serde_json::json!({ "cause": cause })),
            ),
            ApiError::InternalError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", None)
            }
        };

        let message = match &self {
            ApiError::NotFound(msg) | ApiError::BadRequest(msg) | ApiError::InternalError(msg) => {
                msg.clone()
            }
            ApiError::Upstream { message, .. } => message.clone(),
        };

        let detail = ApiErrorDetail {
            code: code.to_string(),
            message,
            details,
        };
        let body = serde_json::json!({
            "success": false,
            "error": detail,
        });

        (status, axum::Json(body)).into_response()
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match &err {
            CoreError::NodeNotFound { .. } | CoreError::TermNotFound { .. } => {
                ApiError::NotFound(err.to_string())
            }
            CoreError::UnknownChartType { .. }
            | CoreError::UnknownTermSource { .. }
            | CoreError::LengthMismatch { .. } => ApiError::BadRequest(err.to_string()),
        }
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        match &err {
            StorageError::GraphNotFound(_)
            | StorageError::NodeNotFound { .. }
            | StorageError::TermNotFound { .. } => ApiError::NotFound(err.to_string()),
            _ => ApiError::InternalError(err.to_string()),
        }
    }
}

impl From<ChartError> for ApiError {
    fn from(err: ChartError) -> Self {
        match err {
            ChartError::Core(core) => core.into(),
            ChartError::Storage(storage) => storage.into(),
            other @ ChartError::DefaultPaletteMissing { .. } => {
                ApiError::InternalError(other.to_string())
            }
        }
    }
}

impl From<TransportError> for ApiError {
    fn from(err: TransportError) -> Self {
        ApiError::Upstream {
            message: err.status_message().to_string(),
            cause: err.to_string(),
        }
    }
}
