use std::sync::Arc;

use crate::applications::transition::NotificationDefaults;
use crate::notify::NotificationChannel;
use crate::store::{ApplicationStore, NotificationStore, PostStore};
use crate::uploads::ObjectStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostStore>,
    pub applications: Arc<dyn ApplicationStore>,
    /// In-app inbox. Read by the notification routes regardless of which
    /// channel delivers new decisions.
    pub notifications: Arc<dyn NotificationStore>,
    /// The one active delivery channel. Swap via NOTIFICATION_CHANNEL.
    pub channel: Arc<dyn NotificationChannel>,
    pub objects: Arc<dyn ObjectStore>,
    pub defaults: NotificationDefaults,
    pub max_upload_bytes: usize,
}
