pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::screening::handlers;
use crate::state::AppState;

/// Multipart framing and the job description ride on top of the file itself.
const BODY_LIMIT_SLACK_BYTES: usize = 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    let body_limit = body_limit(state.config.max_upload_bytes());

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/usage", get(handlers::handle_usage))
        .route("/api/v1/screen", post(handlers::handle_screen_upload))
        .route("/api/v1/screen/text", post(handlers::handle_screen_text))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

// Saturates: an oversized DEMO_MAX_MB must not wrap the limit down to the slack.
fn body_limit(max_upload_bytes: usize) -> usize {
    max_upload_bytes.saturating_add(BODY_LIMIT_SLACK_BYTES)
}
