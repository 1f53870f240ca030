use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use pinhole_core::ShortenerError;
use thiserror::Error;
use tracing::error;

use crate::model::ErrorResponse;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Shortener(#[from] ShortenerError),
    #[error("invalid request body: {0}")]
    BadRequest(String),
    #[error("stored URL cannot be used as a redirect target")]
    InvalidRedirect,
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::Shortener(ShortenerError::InvalidInput(_)) | AppError::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Shortener(ShortenerError::NotFound(_)) => StatusCode::NOT_FOUND,
            AppError::Shortener(ShortenerError::StoreUnavailable(_)) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            AppError::Shortener(ShortenerError::GenerationExhausted { .. })
            | AppError::InvalidRedirect => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // server-side details stay in the logs
        let message = match &self {
            AppError::Shortener(ShortenerError::StoreUnavailable(_)) => {
                error!(error = %self, "store unavailable");
                "store unavailable".to_string()
            }
            AppError::Shortener(ShortenerError::GenerationExhausted { .. }) => {
                error!(error = %self, "short code generation exhausted");
                "could not allocate a short code".to_string()
            }
            AppError::InvalidRedirect => {
                error!(error = %self, "cannot redirect");
                self.to_string()
            }
            AppError::Shortener(ShortenerError::NotFound(_)) => "not found".to_string(),
            _ => self.to_string(),
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
