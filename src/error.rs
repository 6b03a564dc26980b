use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;

/// JSON error response structure
///
/// Callers only ever see the fixed message; the detail carried by
/// [`AppError`] is logged, never returned.
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: &'static str,
}

/// Application errors
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Upstream error: {0}")]
    Upstream(String),
}

impl AppError {
    fn public_message(&self) -> &'static str {
        match self {
            AppError::Validation(_) | AppError::Upstream(_) => "Unprocessable entity",
            AppError::Forbidden(_) => "Forbidden",
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::Upstream(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.public_message(),
        })
    }
}

/// Failure of a single outbound delivery
#[derive(Debug, thiserror::Error)]
pub enum SendError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("reading response failed: {0}")]
    Body(String),

    #[error("unexpected status {0}")]
    Status(u16),
}

impl From<reqwest::Error> for SendError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            SendError::Transport("request timed out".to_string())
        } else if e.is_connect() {
            SendError::Transport(format!("connection failed: {}", e))
        } else {
            SendError::Transport(e.to_string())
        }
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
