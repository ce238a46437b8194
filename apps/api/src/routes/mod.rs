pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::matching::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/match-resume", post(handlers::handle_match_resume))
        .route(
            "/api/v1/jobs/:job_id/matches",
            get(handlers::handle_list_job_matches),
        )
        .route(
            "/api/v1/resumes/:resume_id/matches",
            get(handlers::handle_list_resume_matches),
        )
        .with_state(state)
}
