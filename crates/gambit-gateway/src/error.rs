use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use gambit_core::ShortenerError;
use thiserror::Error;
use tracing::error;

use crate::model::ApiResponse;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    /// The request body is missing, is not JSON, or does not fit the request type.
    #[error("{}", .0.body_text())]
    InvalidBody(#[from] JsonRejection),
    #[error(transparent)]
    Shortener(#[from] ShortenerError),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) | AppError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Shortener(err) => match err {
                ShortenerError::InvalidUrl(_)
                | ShortenerError::InvalidSequence(_)
                | ShortenerError::InvalidExpiration(_) => StatusCode::BAD_REQUEST,
                ShortenerError::SequenceTaken { .. } => StatusCode::CONFLICT,
                ShortenerError::ExhaustedRetries { .. } | ShortenerError::Storage(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        }

        let body = match self {
            AppError::Shortener(ShortenerError::SequenceTaken {
                sequence,
                suggestions,
            }) => ApiResponse::failure(format!("chess sequence already taken: {sequence}"))
                .with_suggestions(suggestions.into_iter().map(|s| s.to_string()).collect()),
            AppError::Shortener(ShortenerError::ExhaustedRetries { attempts }) => {
                ApiResponse::failure("unable to generate a unique chess sequence")
                    .with_message(format!("gave up after {attempts} retries"))
            }
            AppError::Shortener(ShortenerError::Storage(_)) => {
                ApiResponse::failure("internal storage error")
            }
            other => ApiResponse::failure(other.to_string()),
        };

        (status, Json(body)).into_response()
    }
}
