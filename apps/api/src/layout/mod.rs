// Layout stage: maps the canonical resume model into a presentational
// document — fixed section order, per-field fallback text, no painting.
// The visual styling lives in Theme; the raster painter consumes both.

pub mod document;
pub mod sections;
pub mod theme;

// Re-export the public API consumed by other modules (render, routes).
pub use document::{Header, LayoutDocument, Section};
pub use sections::render;
pub use theme::Theme;
