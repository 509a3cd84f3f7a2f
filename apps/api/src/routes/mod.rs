pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::extraction::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;
    Router::new()
        .route("/health", get(health::health_handler))
        // Document uploads (multipart)
        .route("/api/v1/upload-resume", post(handlers::handle_upload_resume))
        .route(
            "/api/v1/upload-job-description",
            post(handlers::handle_upload_job_description),
        )
        // Pasted text
        .route(
            "/api/v1/extract/resume-text",
            post(handlers::handle_extract_resume_text),
        )
        .route("/api/v1/extract/job-text", post(handlers::handle_extract_job_text))
        // Form schemas
        .route("/api/v1/forms/:form", get(handlers::handle_get_form))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
