//! API error types and handling.

use analyst::AnalystError;
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::error;

/// Message returned in place of internal detail in production.
const REDACTED_MESSAGE: &str = "An internal error occurred";

/// API error type.
#[derive(Debug)]
pub enum ApiError {
    /// Unknown dataset id.
    NotFound(String),
    /// The request cannot be served as sent: bad column, bad file, no dataset.
    BadRequest(String),
    /// Anything else. The message is already redacted when needed.
    Internal(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl ApiError {
    /// Log `detail` and build a 500 that only exposes it outside production.
    pub fn internal(detail: impl std::fmt::Display, production: bool) -> Self {
        error!(error = %detail, "request failed");
        if production {
            ApiError::Internal(REDACTED_MESSAGE.to_string())
        } else {
            ApiError::Internal(detail.to_string())
        }
    }

    /// Map a library error: caller mistakes and unreadable uploads are 400s.
    pub fn from_analyst(err: AnalystError, production: bool) -> Self {
        match err {
            AnalystError::MissingColumn { .. }
            | AnalystError::MissingParameter { .. }
            | AnalystError::Csv(_)
            | AnalystError::Spreadsheet(_)
            | AnalystError::UnsupportedFormat(_)
            | AnalystError::EmptyData(_) => ApiError::BadRequest(err.to_string()),
            other => ApiError::internal(other, production),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Malformed bodies and unknown enum values (e.g. a bad `chart_type`) are
/// caller mistakes, not axum's default 415/422 plain-text replies.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (error, message) = match self {
            ApiError::NotFound(msg) => ("not_found", msg),
            ApiError::BadRequest(msg) => ("bad_request", msg),
            ApiError::Internal(msg) => ("internal", msg),
        };

        (
            status,
            Json(ErrorResponse {
                error: error.to_string(),
                message,
            }),
        )
            .into_response()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_errors_are_bad_requests() {
        let err = ApiError::from_analyst(
            AnalystError::MissingColumn {
                column: "ghost".into(),
            },
            true,
        );
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert!(err.to_string().contains("ghost"));
    }

    #[test]
    fn test_internal_detail_hidden_in_production() {
        let err = ApiError::from_analyst(AnalystError::Config("secret path".into()), true);
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!err.to_string().contains("secret"));

        let err = ApiError::from_analyst(AnalystError::Config("secret path".into()), false);
        assert!(err.to_string().contains("secret path"));
    }
}
