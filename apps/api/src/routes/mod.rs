pub mod health;

use axum::{
    http::Uri,
    routing::{get, post},
    Router,
};

use crate::assessment::handlers;
use crate::errors::AppError;
use crate::state::AppState;

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {}", uri.path()))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/skills/extract",
            post(handlers::handle_extract_skills),
        )
        .route(
            "/api/v1/questions/:skill",
            get(handlers::handle_get_question),
        )
        .route("/api/v1/assessments", post(handlers::handle_start_assessment))
        .route(
            "/api/v1/assessments/score",
            post(handlers::handle_score_assessment),
        )
        .fallback(not_found)
        .with_state(state)
}
