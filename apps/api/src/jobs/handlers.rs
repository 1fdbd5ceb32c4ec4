//! Axum route handlers for job postings and ranking.

use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;

use crate::auth::extractor::AuthUser;
use crate::auth::Role;
use crate::errors::AppError;
use crate::jobs::store::create_job;
use crate::models::job::{JobPosting, NewJob};
use crate::ranking::RankedJobView;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct MatchJobsRequest {
    pub resume_text: String,
}

/// GET /jobs
pub async fn handle_list_jobs(
    State(state): State<AppState>,
) -> Result<Json<Vec<JobPosting>>, AppError> {
    Ok(Json(state.jobs.list_jobs().await?))
}

/// POST /jobs (employers only)
pub async fn handle_create_job(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    Json(job): Json<NewJob>,
) -> Result<(StatusCode, Json<JobPosting>), AppError> {
    identity.require(Role::Employer)?;
    if job.title.trim().is_empty() || job.company.trim().is_empty() {
        return Err(AppError::Validation(
            "title and company cannot be empty".to_string(),
        ));
    }

    let created = create_job(&state.db, &job).await?;
    tracing::info!(job_id = created.id, employer = %identity.username, "Job posted");
    Ok((StatusCode::CREATED, Json(created)))
}

/// POST /match-jobs
///
/// Same ranking pipeline as the WebSocket session, without progress events or auto-apply.
pub async fn handle_match_jobs(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    Json(request): Json<MatchJobsRequest>,
) -> Result<Json<Vec<RankedJobView>>, AppError> {
    identity.require(Role::Candidate)?;
    if request.resume_text.trim().is_empty() {
        return Err(AppError::Validation("resume_text cannot be empty".to_string()));
    }

    let jobs = state.jobs.list_jobs().await?;
    Ok(Json(
        state.ranker.rank_and_merge(&request.resume_text, &jobs).await,
    ))
}
