use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::shared::types::ApiResponse;

#[derive(Debug, Error)]
#[allow(dead_code)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Confirmation required: {0}")]
    ConfirmationRequired(String),

    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Non-2xx answer from the catalog or auth service. `message` is the
    /// body's `detail` when present, otherwise `HTTP <status>`.
    #[error("{message}")]
    Remote { status: u16, message: String },

    #[error("Failed to reach remote service: {0}")]
    Transport(String),

    #[error("Malformed response from remote service: {0}")]
    MalformedResponse(String),
}

impl AppError {
    /// Message suitable for an operator-facing banner.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Remote { message, .. } => message.clone(),
            AppError::Validation(msg)
            | AppError::NotFound(msg)
            | AppError::BadRequest(msg)
            | AppError::Unauthorized(msg)
            | AppError::Conflict(msg)
            | AppError::ConfirmationRequired(msg)
            | AppError::RateLimitExceeded(msg) => msg.clone(),
            other => other.to_string(),
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            AppError::MalformedResponse(e.to_string())
        } else {
            AppError::Transport(e.to_string())
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, errors) = match self {
            AppError::NotFound(ref msg) => (StatusCode::NOT_FOUND, msg.clone(), None),
            AppError::Validation(ref msg) => (
                StatusCode::BAD_REQUEST,
                msg.clone(),
                Some(vec![msg.clone()]),
            ),
            AppError::BadRequest(ref msg) => (StatusCode::BAD_REQUEST, msg.clone(), None),
            AppError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    None,
                )
            }
            AppError::Unauthorized(ref msg) => (StatusCode::UNAUTHORIZED, msg.clone(), None),
            AppError::Conflict(ref msg) => (StatusCode::CONFLICT, msg.clone(), None),
            AppError::ConfirmationRequired(ref msg) => {
                (StatusCode::PRECONDITION_REQUIRED, msg.clone(), None)
            }
            AppError::RateLimitExceeded(ref msg) => {
                (StatusCode::TOO_MANY_REQUESTS, msg.clone(), None)
            }
            AppError::Remote {
                status,
                ref message,
            } => {
                tracing::error!("Remote service error: HTTP {} - {}", status, message);
                (remote_status(status), message.clone(), None)
            }
            AppError::Transport(ref msg) => {
                tracing::error!("Remote transport error: {}", msg);
                (StatusCode::BAD_GATEWAY, self.to_string(), None)
            }
            AppError::MalformedResponse(ref msg) => {
                tracing::error!("Malformed remote response: {}", msg);
                (StatusCode::BAD_GATEWAY, self.to_string(), None)
            }
        };

        let body = Json(ApiResponse::<()>::error(Some(message), errors));

        (status, body).into_response()
    }
}

/// Upstream client errors are mirrored, everything else becomes 502.
fn remote_status(status: u16) -> StatusCode {
    match StatusCode::from_u16(status) {
        Ok(code) if code.is_client_error() => code,
        _ => StatusCode::BAD_GATEWAY,
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
