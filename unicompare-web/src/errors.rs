//! API error type and its JSON rendering.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;
use unicompare_core::{AdminError, StoreError};
use unicompare_predict::PredictionError;

/// Errors returned by API handlers, rendered as `{"error": "..."}`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request content was rejected (400).
    #[error("{0}")]
    BadRequest(String),

    /// Missing or wrong admin credentials (401).
    #[error("{0}")]
    Unauthorized(String),

    /// Resource not found (404).
    #[error("{0}")]
    NotFound(String),

    /// Remote store or prediction provider failed (502).
    #[error("{0}")]
    Upstream(String),

    /// Feature not configured on this server (503).
    #[error("{0}")]
    Unavailable(String),

    /// Unexpected server-side failure (500).
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ApiError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 404 for an unknown university id.
    pub fn university_not_found(id: &str) -> Self {
        ApiError::NotFound(format!("University {id} not found"))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            ApiError::Internal(_) => tracing::error!(error = %self, "internal server error"),
            ApiError::Upstream(_) => tracing::warn!(error = %self, "upstream failure"),
            _ => tracing::debug!(error = %self, status = status.as_u16(), "request rejected"),
        }

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Encoding { .. } => ApiError::Internal(err.to_string()),
            _ => ApiError::Upstream(err.to_string()),
        }
    }
}

impl From<AdminError> for ApiError {
    fn from(err: AdminError) -> Self {
        match err {
            AdminError::PasscodeNotConfigured => ApiError::Unavailable(err.to_string()),
            AdminError::IncorrectPasscode | AdminError::Unauthorized => {
                ApiError::Unauthorized(err.to_string())
            }
            AdminError::NameRequired => ApiError::BadRequest(err.to_string()),
        }
    }
}

impl From<PredictionError> for ApiError {
    fn from(err: PredictionError) -> Self {
        if err.is_configuration() {
            ApiError::Unavailable(err.to_string())
        } else {
            ApiError::Upstream(err.to_string())
        }
    }
}
