use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::classifier::ClassifierError;

/// Everything the prediction endpoint can answer with besides a prediction.
///
/// Client mistakes are caught before any decoding work and map to 4xx;
/// anything that goes wrong while processing an accepted upload maps to 500.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Only JPEG or PNG images are supported")]
    UnsupportedMediaType,
    #[error("No file uploaded")]
    MissingFile,
    /// The form could not be read; keeps the status axum assigned (400, 413, ...)
    #[error("Invalid multipart form: {message}")]
    InvalidForm { status: StatusCode, message: String },
    #[error("Failed to process image: {0}")]
    Processing(#[from] ClassifierError),
    #[error("Failed to process image: worker task failed: {0}")]
    Worker(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::UnsupportedMediaType => StatusCode::BAD_REQUEST,
            Self::MissingFile => StatusCode::UNPROCESSABLE_ENTITY,
            Self::InvalidForm { status, .. } => *status,
            Self::Processing(_) | Self::Worker(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<MultipartRejection> for ApiError {
    fn from(err: MultipartRejection) -> Self {
        Self::InvalidForm {
            status: err.status(),
            message: err.body_text(),
        }
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        Self::InvalidForm {
            status: err.status(),
            message: err.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            log::error!("{}", self);
        } else {
            log::warn!("Rejected request: {}", self);
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
