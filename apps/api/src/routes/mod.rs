pub mod health;
pub mod ui;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::state::AppState;
use crate::workflow::handlers;

/// Upload cap for the multipart session endpoints (10 MiB).
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(ui::index_handler))
        .route("/health", get(health::health_handler))
        // Session API
        .route("/api/v1/sessions", post(handlers::handle_session))
        .route(
            "/api/v1/sessions/report",
            post(handlers::handle_session_report),
        )
        // Analysis API
        .route("/api/v1/keywords", post(handlers::handle_keywords))
        .route("/api/v1/ats-score", post(handlers::handle_ats_score))
        .route("/api/v1/diff", post(handlers::handle_diff))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}
