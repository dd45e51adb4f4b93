pub mod health;
pub mod resume;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Resume render pipeline
        .route("/api/v1/resume/preview", post(resume::handle_preview))
        .route("/api/v1/resume/render", post(resume::handle_render))
        .with_state(state)
}
