//! # Request Errors
//!
//! Failures on the suggestion request path. Every variant renders as
//! `{"error": "<message>"}` with a matching status code.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::guard::GuardError;

/// Result type for request handling
pub type SuggestResult<T> = Result<T, SuggestError>;

/// Request path errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SuggestError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// Malformed or incomplete request body
    #[error("{0}")]
    Validation(String),

    // ==================
    // Server Errors (5xx)
    // ==================
    /// Response could not be serialized
    #[error("{0}")]
    Encoding(String),

    /// Processing exceeded the request deadline
    #[error("timeout")]
    Timeout,

    /// Processing failed without producing a response
    #[error("internal error: {0}")]
    Internal(String),
}

impl SuggestError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            SuggestError::Validation(_) => StatusCode::BAD_REQUEST,
            SuggestError::Encoding(_) => StatusCode::INTERNAL_SERVER_ERROR,
            SuggestError::Timeout => StatusCode::INTERNAL_SERVER_ERROR,
            SuggestError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short kind name used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            SuggestError::Validation(_) => "validation",
            SuggestError::Encoding(_) => "encoding",
            SuggestError::Timeout => "timeout",
            SuggestError::Internal(_) => "internal",
        }
    }
}

impl From<GuardError> for SuggestError {
    fn from(err: GuardError) -> Self {
        match err {
            GuardError::Timeout(_) => SuggestError::Timeout,
            GuardError::Panicked => SuggestError::Internal(err.to_string()),
        }
    }
}

/// Error response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for SuggestError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorBody {
            error: self.to_string(),
        });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            SuggestError::Validation("input is empty".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            SuggestError::Encoding("bad float".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(SuggestError::Timeout.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_timeout_renders_as_timeout() {
        assert_eq!(SuggestError::Timeout.to_string(), "timeout");
        assert_eq!(
            SuggestError::from(GuardError::Timeout(Duration::from_secs(2))),
            SuggestError::Timeout
        );
    }

    #[test]
    fn test_panicked_work_is_internal() {
        let err = SuggestError::from(GuardError::Panicked);
        assert_eq!(err.kind(), "internal");
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
