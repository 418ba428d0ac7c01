//! API error handling

use application::PipelineError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// A manually triggered cycle failed
    #[error("Forecast cycle failed: {0}")]
    CycleFailed(#[from] PipelineError),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
}

impl ApiError {
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::CycleFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub const fn code(&self) -> &'static str {
        match self {
            Self::CycleFailed(_) => "cycle_failed",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.to_string(),
            code: self.code().to_string(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_failure_is_internal_error() {
        let err = ApiError::from(PipelineError::Status { status: 503 });
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.code(), "cycle_failed");
        assert!(err.to_string().contains("503"));
    }

    #[test]
    fn response_carries_status() {
        let response = ApiError::from(PipelineError::Decode("eof".into())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
