use axum::{
    extract::{rejection::PathRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::notification::Notification;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InboxResponse {
    pub notifications: Vec<Notification>,
    pub unread_count: usize,
}

/// GET /users/:user_id/notifications
pub async fn handle_list_notifications(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<InboxResponse>, AppError> {
    let notifications = state.notifications.list_for_user(&user_id).await?;
    let unread_count = notifications.iter().filter(|n| !n.read).count();
    Ok(Json(InboxResponse {
        notifications,
        unread_count,
    }))
}

/// PATCH /notifications/:id/read
pub async fn handle_mark_read(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let Path(id) = id?;
    state.notifications.mark_read(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::models::notification::{Notification, NotificationKind};
    use crate::routes::build_router;
    use crate::store::NotificationStore;
    use crate::testing::{sample_application, TestApp};

    async fn send(app: &TestApp, request: Request<Body>) -> (StatusCode, Value) {
        let response = build_router(app.state.clone())
            .oneshot(request)
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn patch(uri: String) -> Request<Body> {
        Request::builder()
            .method(Method::PATCH)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_in_app_decision_lands_in_inbox() {
        let app = TestApp::in_app();
        let application = app.seed(sample_application()).await;

        let request = Request::builder()
            .method(Method::PUT)
            .uri(format!("/applications/{}/status", application.id))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                json!({ "status": "shortlisted", "companyName": "Acme" }).to_string(),
            ))
            .unwrap();
        let (status, _) = send(&app, request).await;
        assert_eq!(status, StatusCode::OK);

        let (status, inbox) = send(&app, get("/users/cand-1/notifications")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(inbox["unreadCount"], 1);
        assert_eq!(inbox["notifications"][0]["type"], "INTERVIEW");
        assert!(inbox["notifications"][0]["message"]
            .as_str()
            .unwrap()
            .contains("Acme"));
    }

    #[tokio::test]
    async fn test_mark_read_clears_unread_count() {
        let app = TestApp::in_app();
        let notification = Notification::unread(
            "cand-1".to_string(),
            "Application Update – Backend Engineer".to_string(),
            "body".to_string(),
            NotificationKind::Rejection,
        );
        app.notifications.insert(&notification).await.unwrap();

        let uri = format!("/notifications/{}/read", notification.id);
        let (status, _) = send(&app, patch(uri.clone())).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        // Marking twice is fine.
        let (status, _) = send(&app, patch(uri)).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (_, inbox) = send(&app, get("/users/cand-1/notifications")).await;
        assert_eq!(inbox["unreadCount"], 0);
        assert_eq!(inbox["notifications"][0]["read"], true);
    }

    #[tokio::test]
    async fn test_mark_read_unknown_is_404() {
        let app = TestApp::in_app();
        let (status, body) =
            send(&app, patch(format!("/notifications/{}/read", uuid::Uuid::new_v4()))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_empty_inbox() {
        let app = TestApp::in_app();
        let (status, inbox) = send(&app, get("/users/nobody/notifications")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(inbox["unreadCount"], 0);
        assert_eq!(inbox["notifications"], json!([]));
    }
}
