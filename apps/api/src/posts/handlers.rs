use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;

use crate::applications::caller::Caller;
use crate::errors::AppError;
use crate::models::post::{HiringPost, NewHiringPost};
use crate::state::AppState;

/// POST /hr/posts
pub async fn handle_create_post(
    State(state): State<AppState>,
    caller: Caller,
    payload: Result<Json<NewHiringPost>, JsonRejection>,
) -> Result<(StatusCode, Json<HiringPost>), AppError> {
    let Json(new) = payload?;
    if let Some(field) = new.first_blank_field() {
        return Err(AppError::InvalidRequest(format!("{field} cannot be empty")));
    }

    let post = HiringPost::publish(new);
    state.posts.insert(&post).await?;
    info!(
        "Caller {caller} published '{}' at {} ({})",
        post.title, post.company_name, post.id
    );

    Ok((StatusCode::CREATED, Json(post)))
}

/// GET /hr/:hr_id/posts
pub async fn handle_recruiter_posts(
    State(state): State<AppState>,
    Path(hr_id): Path<String>,
) -> Result<Json<Vec<HiringPost>>, AppError> {
    Ok(Json(state.posts.fetch_by_recruiter(&hr_id).await?))
}

/// GET /posts
///
/// Open posts only, newest first.
pub async fn handle_active_posts(
    State(state): State<AppState>,
) -> Result<Json<Vec<HiringPost>>, AppError> {
    Ok(Json(state.posts.fetch_active().await?))
}
