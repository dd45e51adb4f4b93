//! Capture seam between the layout stage and the exporter.
//!
//! The exporter never paints; it captures an opaque surface. The trait keeps
//! the export path testable with stub surfaces and keeps the painter
//! swappable behind one seam.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

/// A lossless capture of a rendered surface (PNG-encoded, intrinsic size in
/// device pixels).
#[derive(Debug, Clone)]
pub struct Raster {
    pub width: u32,
    pub height: u32,
    pub png: Vec<u8>,
}

#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("no usable sans-serif font face was found on this system")]
    FontUnavailable,
    #[error("font face could not be parsed: {0}")]
    FontParse(String),
    #[error("raster surface of {width}x{height} px could not be allocated")]
    Allocation { width: u32, height: u32 },
    #[error("PNG encoding failed: {0}")]
    PngEncode(String),
    #[error("capture task failed: {0}")]
    Task(String),
}

/// A fully-rendered visual surface that can be captured as a raster.
#[async_trait]
pub trait RenderSurface: Send + Sync {
    async fn capture(&self) -> Result<Raster, CaptureError>;
}

/// A reference to a surface that may not be mounted yet.
///
/// Export against an unmounted handle is a no-op by contract: no error, no
/// spurious log, no file.
#[derive(Clone)]
pub struct SurfaceHandle {
    surface: Option<Arc<dyn RenderSurface>>,
}

impl SurfaceHandle {
    pub fn unmounted() -> Self {
        Self { surface: None }
    }

    pub fn mounted(surface: Arc<dyn RenderSurface>) -> Self {
        Self {
            surface: Some(surface),
        }
    }

    pub fn surface(&self) -> Option<Arc<dyn RenderSurface>> {
        self.surface.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NullSurface;

    #[async_trait]
    impl RenderSurface for NullSurface {
        async fn capture(&self) -> Result<Raster, CaptureError> {
            Ok(Raster {
                width: 1,
                height: 1,
                png: vec![],
            })
        }
    }

    #[test]
    fn test_unmounted_handle_has_no_surface() {
        let handle = SurfaceHandle::unmounted();
        assert!(handle.surface().is_none());
    }

    #[test]
    fn test_mounted_handle_exposes_surface() {
        let handle = SurfaceHandle::mounted(Arc::new(NullSurface));
        assert!(handle.surface().is_some());
    }
}
