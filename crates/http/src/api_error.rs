//! Typed API error for HTTP handlers.
//!
//! Errors render as the endpoint's failure envelope, `{success: false, error}`,
//! with a matching status code.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use movie_tracker_core::{AppendResponse, CoreError, ReadResponse};
use movie_tracker_storage::StorageError;

/// API error with HTTP status code and human-readable message.
///
/// `Internal` logs the real error server-side and returns a static message
/// to the client.
#[derive(Debug)]
pub enum ApiError {
    /// 400 Bad Request: the submitted row cannot be stored.
    BadRequest(String),
    /// 503 Service Unavailable: the spreadsheet is busy; the same request may
    /// succeed later.
    Unavailable(anyhow::Error),
    /// 500 Internal Server Error. Details logged, not exposed.
    Internal(anyhow::Error),
}

impl ApiError {
    fn status_and_message(self) -> (StatusCode, String) {
        match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::Unavailable(err) => {
                tracing::warn!(error = %err, "spreadsheet busy");
                (StatusCode::SERVICE_UNAVAILABLE, "spreadsheet busy, retry later".to_owned())
            },
            Self::Internal(err) => {
                tracing::error!(error = ?err, "internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error".to_owned())
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        (status, Json(AppendResponse::failed(message))).into_response()
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        if err.is_transient() {
            Self::Unavailable(err.into())
        } else {
            Self::Internal(err.into())
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidMovie(msg) => Self::BadRequest(msg),
            other => Self::Internal(other.into()),
        }
    }
}

/// Failure of a full read. Renders with an empty `movies` list so clients
/// can decode success and failure with one type.
#[derive(Debug)]
pub struct ReadError(pub ApiError);

impl IntoResponse for ReadError {
    fn into_response(self) -> Response {
        let (status, message) = self.0.status_and_message();
        (status, Json(ReadResponse::failed(message))).into_response()
    }
}

impl From<ApiError> for ReadError {
    fn from(err: ApiError) -> Self {
        Self(err)
    }
}
