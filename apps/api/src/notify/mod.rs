//! Notification Dispatcher: tells a candidate about a recruiter's decision.
//!
//! One `NotificationChannel` is active per deployment (`NOTIFICATION_CHANNEL`):
//! `EmailChannel` (SendGrid) or `InAppChannel` (notification records).
//! Each `deliver` call builds and sends exactly one message. Failures are
//! returned to the caller as-is; there is no retry or dead-letter queue.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::notification::NotificationKind;
use crate::store::StoreError;

pub mod email;
pub mod handlers;
pub mod in_app;
pub mod templates;

/// Everything a channel needs to address and phrase one decision message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    /// Candidate user id, the recipient of in-app records.
    pub user_id: String,
    pub email: String,
    pub candidate_name: String,
    pub job_title: String,
    pub company_name: String,
    pub hr_name: String,
    pub kind: NotificationKind,
}

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("provider rejected message (status {status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("notification store error: {0}")]
    Store(#[from] StoreError),
}

#[async_trait]
pub trait NotificationChannel: Send + Sync {
    /// Short name for logs ("email", "in_app").
    fn name(&self) -> &'static str;

    async fn deliver(&self, decision: &Decision) -> Result<(), DispatchError>;
}
