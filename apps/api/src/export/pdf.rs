//! PDF exporter — capture, page sizing, placement, save.
//!
//! Per invocation the exporter walks Idle → Capturing → Encoding → Saved, or
//! stops at Failed; an unmounted surface short-circuits Idle → Idle (no-op).
//! Capture and encode are strictly sequential; nothing overlaps. Failures
//! emit exactly one diagnostic event to the log and reject the call — no
//! retry, no partial output.

use printpdf::image::RawImage;
use printpdf::ops::Op;
use printpdf::xobject::{XObject, XObjectTransform};
use printpdf::{Mm, PdfDocument, PdfPage, PdfSaveOptions, Pt, XObjectId};
use thiserror::Error;
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::render::surface::{CaptureError, Raster, SurfaceHandle};

/// Fixed physical page: A4 portrait.
pub const PAGE_WIDTH_MM: f32 = 210.0;
pub const PAGE_HEIGHT_MM: f32 = 297.0;

/// Download base name used when the subject's full name is absent or empty.
pub const GENERIC_BASENAME: &str = "Resume";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportPhase {
    Idle,
    Capturing,
    Encoding,
    Saved,
    Failed,
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("capture failed: {0}")]
    Capture(#[from] CaptureError),
    #[error("encode failed: {0}")]
    Encode(String),
}

/// A finished export: the suggested download name and the document bytes.
#[derive(Debug, Clone)]
pub struct ExportedPdf {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// `<fullName>.pdf`, or `Resume.pdf` when the name is absent or trims to
/// empty — consistent with the header's treatment of a missing name.
pub fn suggested_file_name(full_name: Option<&str>) -> String {
    match full_name.map(str::trim).filter(|name| !name.is_empty()) {
        Some(name) => format!("{name}.pdf"),
        None => format!("{GENERIC_BASENAME}.pdf"),
    }
}

/// Aspect-ratio law: the raster always fills the page width edge to edge and
/// the placed height is derived from the intrinsic pixel size — never chosen
/// independently, so the image cannot distort.
pub fn placed_image_height_mm(raster_width: u32, raster_height: u32) -> f32 {
    PAGE_WIDTH_MM * raster_height as f32 / raster_width as f32
}

/// Captures the surface behind `handle` and delivers a single-page A4 PDF.
///
/// Returns `Ok(None)` without logging when the handle is unmounted (the
/// no-op contract). Capture runs first and encode starts only after it
/// resolves; either failure aborts the run with a single `error!` event.
pub async fn export_to_pdf(
    handle: &SurfaceHandle,
    file_name: &str,
) -> Result<Option<ExportedPdf>, ExportError> {
    let Some(surface) = handle.surface() else {
        debug!(phase = ?ExportPhase::Idle, "export skipped: surface not mounted");
        return Ok(None);
    };

    let run_id = Uuid::new_v4();
    debug!(%run_id, phase = ?ExportPhase::Capturing, "capturing rendered surface");
    let raster = match surface.capture().await {
        Ok(raster) => raster,
        Err(err) => {
            error!(%run_id, phase = ?ExportPhase::Failed, "resume export failed: {err}");
            return Err(ExportError::Capture(err));
        }
    };

    debug!(
        %run_id,
        phase = ?ExportPhase::Encoding,
        width = raster.width,
        height = raster.height,
        "encoding captured raster into PDF"
    );
    let bytes = match encode_pdf(&raster, file_name.trim_end_matches(".pdf")) {
        Ok(bytes) => bytes,
        Err(err) => {
            error!(%run_id, phase = ?ExportPhase::Failed, "resume export failed: {err}");
            return Err(err);
        }
    };

    info!(
        %run_id,
        phase = ?ExportPhase::Saved,
        file_name,
        size = bytes.len(),
        "resume exported"
    );
    Ok(Some(ExportedPdf {
        file_name: file_name.to_string(),
        bytes,
    }))
}

/// Builds the one-page document: decode the PNG, size the page, place the
/// image at the page origin spanning the full width, save to bytes.
fn encode_pdf(raster: &Raster, title: &str) -> Result<Vec<u8>, ExportError> {
    let mut decode_warnings = Vec::new();
    let image = RawImage::decode_from_bytes(&raster.png, &mut decode_warnings)
        .map_err(|err| ExportError::Encode(format!("failed to decode captured raster: {err}")))?;

    // Intrinsic pixel size is read from the decoded image itself.
    let image_width = image.width as u32;
    let image_height = image.height as u32;
    if image_width == 0 || image_height == 0 {
        return Err(ExportError::Encode(
            "captured raster has zero extent".to_string(),
        ));
    }

    let mut document = PdfDocument::new(title);
    let image_id = XObjectId::new();
    document
        .resources
        .xobjects
        .map
        .insert(image_id.clone(), XObject::Image(image));

    let page_width_pt = Mm(PAGE_WIDTH_MM).into_pt().0;
    let page_height_pt = Mm(PAGE_HEIGHT_MM).into_pt().0;
    let placed_height_pt = Mm(placed_image_height_mm(image_width, image_height))
        .into_pt()
        .0;

    // At 72 dpi one raster pixel is one point, so one factor scales the image
    // to the full page width; the same factor applies vertically, keeping the
    // aspect ratio exact. PDF origin is bottom-left: translate so the image's
    // top edge sits at the top of the page.
    let transform = XObjectTransform {
        translate_x: Some(Pt(0.0)),
        translate_y: Some(Pt(page_height_pt - placed_height_pt)),
        scale_x: Some(page_width_pt / image_width as f32),
        scale_y: Some(placed_height_pt / image_height as f32),
        rotate: None,
        dpi: Some(72.0),
    };

    let ops = vec![Op::UseXobject {
        id: image_id,
        transform,
    }];
    let page = PdfPage::new(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), ops);
    document.pages.push(page);

    let mut bytes = Vec::new();
    let mut save_warnings = Vec::new();
    document.save_writer(&mut bytes, &PdfSaveOptions::default(), &mut save_warnings);
    Ok(bytes)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
