//! Axum route handlers for the resume render pipeline.

use std::sync::Arc;

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use bytes::Bytes;
use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::export::{export_to_pdf, suggested_file_name};
use crate::layout::{self, LayoutDocument};
use crate::models::resume::ResumeModel;
use crate::normalize::{decode_payload, normalize};
use crate::render::{DocumentSurface, SurfaceHandle};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

/// Body for both pipeline endpoints: the resume document exactly as handed
/// over by the upstream channel — still a JSON-encoded string.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderRequest {
    pub resume_data: Option<String>,
}

/// Input boundary: absent payload and undecodable payload are the two
/// reportable pre-render conditions; everything past this point is the
/// normalizer's problem and never fails.
fn decode_and_normalize(request: &RenderRequest) -> Result<ResumeModel, AppError> {
    let payload = request
        .resume_data
        .as_deref()
        .ok_or(AppError::MissingInput)?;
    let raw = decode_payload(payload)?;
    Ok(normalize(Some(raw)))
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/resume/preview
///
/// Decode → normalize → render. Returns the layout document as JSON so a
/// client can inspect sections and fallbacks without producing a file.
pub async fn handle_preview(
    State(_state): State<AppState>,
    Json(request): Json<RenderRequest>,
) -> Result<Json<LayoutDocument>, AppError> {
    let model = decode_and_normalize(&request)?;
    Ok(Json(layout::render(&model)))
}

/// POST /api/v1/resume/render
///
/// Full pipeline: decode → normalize → render → rasterize → export.
/// Responds with the PDF bytes as a named attachment.
pub async fn handle_render(
    State(state): State<AppState>,
    Json(request): Json<RenderRequest>,
) -> Result<Response, AppError> {
    let model = decode_and_normalize(&request)?;
    let file_name = suggested_file_name(model.personal_information.full_name.as_deref());
    let doc = layout::render(&model);
    info!(
        %file_name,
        sections = doc.sections.len(),
        "rendering resume for export"
    );

    let surface = DocumentSurface::new(
        doc,
        state.theme.clone(),
        state.fonts.clone(),
        state.config.render_scale,
    );
    let handle = SurfaceHandle::mounted(Arc::new(surface));

    let Some(exported) = export_to_pdf(&handle, &file_name).await? else {
        // Unreachable with the handle mounted above, but the no-op contract
        // means "no document", not "error".
        return Ok(StatusCode::NO_CONTENT.into_response());
    };

    let headers = [
        (header::CONTENT_TYPE, "application/pdf".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", exported.file_name),
        ),
    ];
    Ok((headers, Bytes::from(exported.bytes)).into_response())
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
