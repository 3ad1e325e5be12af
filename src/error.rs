use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::feed::FeedError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Unsupported format: {0}")]
    Format(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Upstream feed error: {message}")]
    Upstream {
        message: String,
        /// Whether the caller may reasonably retry. Surfaced in the error
        /// body; this service never retries on the caller's behalf.
        transient: bool,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    transient: Option<bool>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let mut transient = None;
        let (status, message) = match &self {
            AppError::Validation(msg) | AppError::Format(msg) => {
                tracing::warn!(error = %msg, "Validation error");
                (StatusCode::BAD_REQUEST, msg.clone())
            }
            AppError::NotFound(msg) => {
                tracing::debug!(error = %msg, "Not found");
                (StatusCode::NOT_FOUND, msg.clone())
            }
            AppError::Upstream {
                message,
                transient: is_transient,
            } => {
                tracing::error!(error = %message, transient = is_transient, "Upstream feed error");
                transient = Some(*is_transient);
                (StatusCode::BAD_GATEWAY, self.to_string())
            }
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, msg.clone())
            }
        };

        let body = Json(ErrorResponse {
            error: message,
            code: status.as_u16(),
            transient,
        });

        (status, body).into_response()
    }
}

impl From<FeedError> for AppError {
    fn from(err: FeedError) -> Self {
        AppError::Upstream {
            transient: err.is_transient(),
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
