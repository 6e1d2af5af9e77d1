use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::applications::caller::Caller;
use crate::applications::transition::{transition_status, StatusUpdateRequest, TransitionOutcome};
use crate::errors::AppError;
use crate::models::application::{ApplicationStatus, JobApplication, NewApplication};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct StatusUpdateResponse {
    pub success: bool,
    pub message: &'static str,
    pub status: ApplicationStatus,
    pub notified: bool,
}

/// POST /applications
///
/// Job title and owning recruiter are copied from the referenced post. 404 for
/// an unknown post, 400 when the post is closed.
pub async fn handle_submit(
    State(state): State<AppState>,
    payload: Result<Json<NewApplication>, JsonRejection>,
) -> Result<(StatusCode, Json<JobApplication>), AppError> {
    let Json(new) = payload?;
    if let Some(field) = new.first_blank_field() {
        return Err(AppError::InvalidRequest(format!("{field} cannot be empty")));
    }

    let post = state
        .posts
        .fetch_by_id(new.post_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Hiring post {} not found", new.post_id)))?;
    if !post.is_open() {
        return Err(AppError::InvalidRequest(format!(
            "Hiring post {} is no longer accepting applications",
            post.id
        )));
    }

    let application = JobApplication::submit(new, &post);
    state.applications.insert(&application).await?;
    info!(
        "Candidate {} applied for '{}' ({})",
        application.candidate_id, application.job_title, application.id
    );

    Ok((StatusCode::CREATED, Json(application)))
}

/// GET /applications/:id
pub async fn handle_get_application(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<JobApplication>, AppError> {
    let Path(id) = id?;
    let application = state
        .applications
        .fetch_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Application {id} not found")))?;
    Ok(Json(application))
}

/// GET /hr/:hr_id/applications
pub async fn handle_recruiter_applications(
    State(state): State<AppState>,
    Path(hr_id): Path<String>,
) -> Result<Json<Vec<JobApplication>>, AppError> {
    Ok(Json(state.applications.fetch_by_recruiter(&hr_id).await?))
}

/// PUT /applications/:id/status
///
/// 404 for an unknown id, 400 for a missing or malformed body, 500 when the
/// store or the notification channel fails.
pub async fn handle_update_status(
    State(state): State<AppState>,
    caller: Caller,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<StatusUpdateRequest>, JsonRejection>,
) -> Result<Json<StatusUpdateResponse>, AppError> {
    let Path(id) = id?;
    let Json(request) = payload?;
    let status = request.status;

    let outcome = transition_status(
        state.applications.as_ref(),
        state.channel.as_ref(),
        &state.defaults,
        &caller,
        id,
        request,
    )
    .await?;

    Ok(Json(StatusUpdateResponse {
        success: true,
        message: outcome.message(),
        status,
        notified: outcome == TransitionOutcome::Notified,
    }))
}
