// Render stage: turns a laid-out document into a captured raster.
// Painting is CPU-bound and must run inside tokio::task::spawn_blocking.

pub mod fonts;
pub mod rasterizer;
pub mod surface;

// Re-export the public API consumed by other modules (export, routes).
pub use fonts::FontStore;
pub use surface::{CaptureError, Raster, RenderSurface, SurfaceHandle};

use std::sync::Arc;

use async_trait::async_trait;

use crate::layout::{LayoutDocument, Theme};

/// The production surface: a laid-out document plus everything needed to
/// paint it. Cheap to clone; the capture runs on the blocking pool against
/// the shared immutable document.
#[derive(Clone)]
pub struct DocumentSurface {
    doc: Arc<LayoutDocument>,
    theme: Theme,
    fonts: Arc<FontStore>,
    scale: f32,
}

impl DocumentSurface {
    pub fn new(doc: LayoutDocument, theme: Theme, fonts: Arc<FontStore>, scale: f32) -> Self {
        Self {
            doc: Arc::new(doc),
            theme,
            fonts,
            scale,
        }
    }
}

#[async_trait]
impl RenderSurface for DocumentSurface {
    async fn capture(&self) -> Result<Raster, CaptureError> {
        let surface = self.clone();
        tokio::task::spawn_blocking(move || {
            rasterizer::rasterize(&surface.doc, &surface.theme, &surface.fonts, surface.scale)
        })
        .await
        .map_err(|err| CaptureError::Task(err.to_string()))?
    }
}
