//! Axum route handlers for the resume API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use serde::Deserialize;

use crate::auth::extractor::AuthUser;
use crate::auth::Role;
use crate::errors::AppError;
use crate::resume::artifact::{generate_profile_artifact, ProfileArtifact};
use crate::resume::audit::{audit_application, AuditReport};
use crate::resume::parser::{extract_pdf_text, parse_resume, ResumeProfile, ResumeSources};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ResumeTextRequest {
    pub resume_text: String,
}

#[derive(Debug, Deserialize)]
pub struct AuditRequest {
    pub original_resume: String,
    pub tailored_text: String,
}

/// POST /resume/artifact
pub async fn handle_profile_artifact(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    Json(request): Json<ResumeTextRequest>,
) -> Result<Json<ProfileArtifact>, AppError> {
    identity.require(Role::Candidate)?;
    if request.resume_text.trim().is_empty() {
        return Err(AppError::Validation("resume_text cannot be empty".to_string()));
    }

    Ok(Json(
        generate_profile_artifact(state.llm.as_ref(), &request.resume_text).await,
    ))
}

/// POST /resume/parse-text
pub async fn handle_parse_resume_text(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    Json(sources): Json<ResumeSources>,
) -> Result<Json<ResumeProfile>, AppError> {
    identity.require(Role::Candidate)?;
    Ok(Json(parse_resume(state.llm.as_ref(), &sources).await?))
}

/// POST /resume/parse
///
/// Multipart form: `resume` (PDF file, required) plus the optional text fields of
/// `ResumeSources`.
pub async fn handle_parse_resume_pdf(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    mut multipart: Multipart,
) -> Result<Json<ResumeProfile>, AppError> {
    identity.require(Role::Candidate)?;

    let mut pdf: Option<Bytes> = None;
    let mut sources = ResumeSources::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "resume" => {
                let filename = field.file_name().unwrap_or_default().to_lowercase();
                if !filename.ends_with(".pdf") {
                    return Err(AppError::Validation(
                        "Only PDF files are supported".to_string(),
                    ));
                }
                pdf = Some(field.bytes().await?);
            }
            "linkedin_text" => sources.linkedin_text = Some(field.text().await?),
            "portfolio_links" => sources.portfolio_links = Some(field.text().await?),
            "github_links" => sources.github_links = Some(field.text().await?),
            "projects" => sources.projects = Some(field.text().await?),
            _ => {}
        }
    }

    let pdf = pdf.ok_or_else(|| AppError::Validation("resume file is required".to_string()))?;
    sources.resume_text = extract_pdf_text(pdf.to_vec()).await?;

    Ok(Json(parse_resume(state.llm.as_ref(), &sources).await?))
}

/// POST /applications/audit
pub async fn handle_audit_application(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    Json(request): Json<AuditRequest>,
) -> Result<Json<AuditReport>, AppError> {
    identity.require(Role::Candidate)?;
    if request.original_resume.trim().is_empty() || request.tailored_text.trim().is_empty() {
        return Err(AppError::Validation(
            "original_resume and tailored_text are required".to_string(),
        ));
    }

    Ok(Json(
        audit_application(
            state.llm.as_ref(),
            &request.original_resume,
            &request.tailored_text,
        )
        .await,
    ))
}
