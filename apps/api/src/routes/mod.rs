pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::diagnostics::handlers as diagnostics;
use crate::state::AppState;
use crate::submissions::handlers as submissions;

/// Base64 inflates media by a third; leave room for the rest of the form.
fn body_limit(max_media_bytes: usize) -> usize {
    max_media_bytes.saturating_mul(2)
}

pub fn build_router(state: AppState) -> Router {
    let limit = body_limit(state.config.max_media_bytes);

    Router::new()
        .route("/health", get(health::health_handler))
        // Diagnostics API
        .route(
            "/api/v1/diagnostics/devices",
            get(diagnostics::handle_list_devices),
        )
        .route(
            "/api/v1/diagnostics/analyze",
            post(diagnostics::handle_analyze),
        )
        .route(
            "/api/v1/diagnostics/analyze/upload",
            post(diagnostics::handle_analyze_upload),
        )
        // Submissions API
        .route("/api/v1/bookings", post(submissions::handle_booking))
        .route("/api/v1/contact", post(submissions::handle_contact))
        .layer(DefaultBodyLimit::max(limit))
        .with_state(state)
}
