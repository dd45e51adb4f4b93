use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::export::ExportError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Note the absent case: a malformed field inside the raw document is never
/// an error — the normalizer absorbs it before rendering begins.
#[derive(Debug, Error)]
pub enum AppError {
    /// No raw document was supplied to the pipeline at all.
    #[error("No resume data was supplied")]
    MissingInput,

    /// The raw document failed to decode from its serialized form.
    #[error("Resume data failed to decode: {0}")]
    UnparsableInput(String),

    /// Capture or encode failed during export.
    #[error("Export failed: {0}")]
    Export(#[from] ExportError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::MissingInput => (
                StatusCode::BAD_REQUEST,
                "NO_DATA",
                "No resume data available to display".to_string(),
            ),
            AppError::UnparsableInput(detail) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "UNPARSABLE_INPUT",
                format!("Could not load resume data. {detail}"),
            ),
            AppError::Export(_) => {
                // The exporter already emitted its single diagnostic event;
                // the client only learns that no document was produced.
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "EXPORT_ERROR",
                    "The resume could not be exported".to_string(),
                )
            }
            AppError::Internal(err) => {
                tracing::error!("Internal error: {err:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
