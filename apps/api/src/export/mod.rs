// Export stage: captures the rendered surface and wraps the raster into a
// single-page A4 PDF delivered as a named download.

pub mod pdf;

pub use pdf::{export_to_pdf, suggested_file_name, ExportError, ExportedPdf};
