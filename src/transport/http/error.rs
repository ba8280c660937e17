//! The API error taxonomy and its single rendering point.
//!
//! Every failure a handler returns converts into [`ApiError`]; its
//! `IntoResponse` impl is the centralized handler that serializes the
//! `{"error": {"message", "status"}}` body with the mirrored status code.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

use crate::app::book_store::StoreError;
use crate::domain::book::FieldError;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Schema validation failed; carries every field-level error.
    #[error("payload validation failed")]
    Validation(Vec<FieldError>),
    /// Malformed request (unparseable JSON body or query string).
    #[error("{0}")]
    BadRequest(String),
    #[error("There is no book with an isbn '{0}'")]
    NotFound(String),
    /// Anything the router does not classify, rendered as 500.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(isbn) => ApiError::NotFound(isbn),
            StoreError::Database(e) => ApiError::Internal(e.into()),
        }
    }
}

#[derive(Serialize, Debug, ToSchema)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct ErrorDetail {
    pub message: ErrorMessage,
    pub status: u16,
}

/// A single message for most failures; the full error list for validation
/// failures, matching what the validator reported.
#[derive(Serialize, Debug, ToSchema)]
#[serde(untagged)]
pub enum ErrorMessage {
    One(String),
    Many(Vec<String>),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Validation(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if let ApiError::Internal(err) = &self {
            tracing::error!(error = %err, "request failed");
        }

        let message = match self {
            ApiError::Validation(errors) => {
                ErrorMessage::Many(errors.iter().map(ToString::to_string).collect())
            }
            other => ErrorMessage::One(other.to_string()),
        };

        let body = ErrorBody {
            error: ErrorDetail { message, status: status.as_u16() },
        };
        (status, Json(body)).into_response()
    }
}
