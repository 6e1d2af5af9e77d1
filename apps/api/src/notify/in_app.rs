use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::models::notification::Notification;
use crate::notify::templates::render;
use crate::notify::{Decision, DispatchError, NotificationChannel};
use crate::store::NotificationStore;

/// Delivers a decision as an unread in-app notification record.
pub struct InAppChannel {
    store: Arc<dyn NotificationStore>,
}

impl InAppChannel {
    pub fn new(store: Arc<dyn NotificationStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl NotificationChannel for InAppChannel {
    fn name(&self) -> &'static str {
        "in_app"
    }

    async fn deliver(&self, decision: &Decision) -> Result<(), DispatchError> {
        let message = render(decision);
        let notification = Notification::unread(
            decision.user_id.clone(),
            message.subject,
            message.body,
            decision.kind,
        );
        self.store.insert(&notification).await?;
        debug!(
            "Stored notification {} for user {}",
            notification.id, notification.user_id
        );
        Ok(())
    }
}
