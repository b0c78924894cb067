//! HTTP error mapping.
//!
//! Every failure leaves the service as `{"error": "<message>"}` with the
//! status code owned by the underlying error type.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tenancy_auth::AuthError;
use tenancy_org::OrgError;
use thiserror::Error;

/// Errors surfaced by request handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Organization resource failure
    #[error(transparent)]
    Org(#[from] OrgError),

    /// Authentication or credential failure
    #[error(transparent)]
    Auth(#[from] AuthError),
}

/// Result type for handlers.
pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        let code = match self {
            ApiError::Org(e) => e.status_code(),
            ApiError::Auth(e) => e.status_code(),
        };
        StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Stable code for logs.
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::Org(e) => e.error_code(),
            ApiError::Auth(e) => e.error_code(),
        }
    }

    fn is_server_error(&self) -> bool {
        match self {
            ApiError::Org(e) => e.is_server_error(),
            ApiError::Auth(e) => e.is_server_error(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if self.is_server_error() {
            tracing::error!(code = self.error_code(), error = %self, "request failed");
        } else {
            tracing::debug!(code = self.error_code(), error = %self, "request rejected");
        }

        let body = ErrorBody {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
