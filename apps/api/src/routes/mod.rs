pub mod health;

use axum::{extract::DefaultBodyLimit, routing::get, routing::post, Router};

use crate::matching::handlers;
use crate::state::AppState;

/// Largest accepted résumé upload.
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Matching API
        .route("/api/v1/match", post(handlers::handle_match))
        .route("/api/v1/match/llm", post(handlers::handle_match_llm))
        .route(
            "/api/v1/match/upload",
            post(handlers::handle_match_upload).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route("/api/v1/keywords", post(handlers::handle_keywords))
        // HR review
        .route("/api/v1/shortlist", post(handlers::handle_shortlist))
        .with_state(state)
}
