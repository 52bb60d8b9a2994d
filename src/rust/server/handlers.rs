use std::sync::Arc;
use std::time::Instant;

use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::http::header;
use axum::Json;
use log::info;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::error::ApiError;
use super::AppState;
use crate::classifier::Prediction;

/// Multipart field carrying the uploaded image.
pub const FILE_FIELD: &str = "file";
/// Declared content types accepted for the upload.
pub const ACCEPTED_CONTENT_TYPES: [&str; 2] = ["image/jpeg", "image/png"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictResponse {
    pub prediction: String,
    pub confidence: f64,
}

impl From<Prediction> for PredictResponse {
    fn from(prediction: Prediction) -> Self {
        Self {
            prediction: prediction.label,
            confidence: prediction.confidence,
        }
    }
}

/// `POST /predict`
///
/// Looks for the `file` field, checks its declared content type, buffers it
/// and classifies it on the blocking thread pool.
pub async fn predict(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<PredictResponse>, ApiError> {
    let mut multipart = multipart?;

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        // field.content_type() is normalized by mime; compare the header as sent
        let content_type = field
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default();
        if !ACCEPTED_CONTENT_TYPES.contains(&content_type) {
            return Err(ApiError::UnsupportedMediaType);
        }

        let bytes = field.bytes().await?;

        let start = Instant::now();
        let size = bytes.len();
        let classifier = Arc::clone(&state.classifier);
        let prediction = tokio::task::spawn_blocking(move || classifier.classify_bytes(&bytes))
            .await
            .map_err(|e| ApiError::Worker(e.to_string()))??;

        info!(
            "Classified {} byte upload as {} ({:.4}) in {:.2?}",
            size,
            prediction.label,
            prediction.confidence,
            start.elapsed()
        );
        return Ok(Json(prediction.into()));
    }

    Err(ApiError::MissingFile)
}

/// `GET /health`
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "OK" }))
}
