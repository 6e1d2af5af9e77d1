pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, patch, post, put},
    Router,
};

use crate::applications::handlers as applications;
use crate::notify::handlers as notifications;
use crate::posts::handlers as posts;
use crate::state::AppState;
use crate::uploads::handlers as uploads;

pub fn build_router(state: AppState) -> Router {
    let max_upload_bytes = state.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Hiring posts
        .route("/hr/posts", post(posts::handle_create_post))
        .route("/hr/:hr_id/posts", get(posts::handle_recruiter_posts))
        .route("/posts", get(posts::handle_active_posts))
        // Applications
        .route("/applications", post(applications::handle_submit))
        .route(
            "/applications/:id",
            get(applications::handle_get_application),
        )
        .route(
            "/applications/:id/status",
            put(applications::handle_update_status),
        )
        .route(
            "/hr/:hr_id/applications",
            get(applications::handle_recruiter_applications),
        )
        // In-app notifications
        .route(
            "/users/:user_id/notifications",
            get(notifications::handle_list_notifications),
        )
        .route(
            "/notifications/:id/read",
            patch(notifications::handle_mark_read),
        )
        // File upload relay
        .route(
            "/upload",
            post(uploads::handle_upload).layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .with_state(state)
}
