mod config;
mod errors;
mod export;
mod layout;
mod models;
mod normalize;
mod render;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::layout::Theme;
use crate::render::FontStore;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (every variable has a default)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Vellum API v{}", env!("CARGO_PKG_VERSION"));

    // Discover system fonts once. A host without a usable sans-serif face can
    // never capture a surface, so fail at startup rather than per request.
    let fonts = FontStore::discover().map_err(|err| anyhow!("font discovery failed: {err}"))?;
    info!("Font store initialized");

    let theme = Theme::default();
    info!(
        "Raster config: {}px content width at {}x scale",
        theme.content_width, config.render_scale
    );

    // Build app state
    let state = AppState {
        config: config.clone(),
        theme,
        fonts: Arc::new(fonts),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
