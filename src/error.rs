//! API error type and its HTTP mapping.
//!
//! Every failure surfaced by the HTTP layer is converted into the
//! fixed-shape JSON body `{"message": "..."}` plus a status code. There are
//! no structured error codes; clients pattern-match on the status alone.
//!
//! Internal failures carry the underlying cause for the logs, but the
//! public body only ever shows the route's fixed message.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// The error type returned by every handler.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The addressed record does not exist.
    #[error("{0}")]
    NotFound(&'static str),

    /// Malformed id, rejected payload, or unreadable multipart form.
    #[error("{0}")]
    BadRequest(String),

    /// Owner login failure.
    #[error("{0}")]
    Unauthorized(&'static str),

    /// Store or upload failure. `message` is the route's fixed public text;
    /// `cause` goes to the logs and is never exposed to the client.
    #[error("{message}")]
    Internal {
        message: &'static str,
        cause: anyhow::Error,
    },
}

impl ApiError {
    /// Wrap a store or upload failure with the route's fixed public message.
    pub fn internal(message: &'static str, cause: anyhow::Error) -> Self {
        ApiError::Internal { message, cause }
    }

    /// HTTP status for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal { message, cause } = &self {
            error!("{}: {:#}", message, cause);
        }

        let status = self.status_code();
        let body = Json(json!({ "message": self.to_string() }));
        (status, body).into_response()
    }
}
