use std::sync::Arc;

use crate::config::Config;
use crate::layout::Theme;
use crate::render::FontStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Visual theme for the painted surface. One theme per process; the
    /// pipeline itself is stateless per request.
    pub theme: Theme,
    /// System font faces discovered once at startup.
    pub fonts: Arc<FontStore>,
}
