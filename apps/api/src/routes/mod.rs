pub mod health;
pub mod me;

use axum::{
    routing::{get, post},
    Router,
};

use crate::jobs::handlers as jobs;
use crate::resume::handlers as resume;
use crate::session::ws::ws_match_handler;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/me", get(me::me_handler))
        // Jobs & ranking
        .route(
            "/jobs",
            get(jobs::handle_list_jobs).post(jobs::handle_create_job),
        )
        .route("/match-jobs", post(jobs::handle_match_jobs))
        .route("/ws/match", get(ws_match_handler))
        // Resume intelligence
        .route("/resume/artifact", post(resume::handle_profile_artifact))
        .route("/resume/parse-text", post(resume::handle_parse_resume_text))
        .route("/resume/parse", post(resume::handle_parse_resume_pdf))
        .route(
            "/applications/audit",
            post(resume::handle_audit_application),
        )
        .with_state(state)
}
