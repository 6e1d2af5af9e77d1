//! Status Transition Handler.
//!
//! fetch → same status? no-op → write → notify (shortlisted/rejected only).
//!
//! Any status may follow any other. The status write and the notification
//! are not coupled: if delivery fails after the write, the new status stays
//! and the caller gets `DispatchFailure`. Concurrent calls on one application
//! are not serialized; each decides whether to notify from the status it read.

use serde::Deserialize;
use tracing::{debug, info};
use uuid::Uuid;

use crate::applications::caller::Caller;
use crate::errors::AppError;
use crate::models::application::{ApplicationStatus, JobApplication};
use crate::models::notification::NotificationKind;
use crate::notify::{Decision, NotificationChannel};
use crate::store::ApplicationStore;

/// Body of `PUT /applications/:id/status`.
///
/// Only `status` is required. The remaining fields let the recruiter UI pass
/// denormalized names so the message matches what the recruiter sees; when
/// absent the stored application and configured defaults are used.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdateRequest {
    pub status: ApplicationStatus,
    #[serde(default)]
    pub candidate_email: Option<String>,
    #[serde(default)]
    pub candidate_name: Option<String>,
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub hr_name: Option<String>,
}

#[cfg(test)]
impl StatusUpdateRequest {
    pub fn bare(status: ApplicationStatus) -> Self {
        Self {
            status,
            candidate_email: None,
            candidate_name: None,
            job_title: None,
            company_name: None,
            hr_name: None,
        }
    }
}

/// Fallback sender names for messages whose request carried none.
#[derive(Debug, Clone)]
pub struct NotificationDefaults {
    pub company_name: String,
    pub hr_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionOutcome {
    /// Requested status already stored; nothing written or sent.
    Unchanged,
    /// Status written; the new status does not warrant a message.
    Updated,
    /// Status written and exactly one message delivered.
    Notified,
}

impl TransitionOutcome {
    pub fn message(self) -> &'static str {
        match self {
            TransitionOutcome::Unchanged => "Status unchanged",
            TransitionOutcome::Updated => "Status updated",
            TransitionOutcome::Notified => "Status updated and candidate notified",
        }
    }
}

/// Which message, if any, a transition into `status` sends.
pub fn notification_for(status: ApplicationStatus) -> Option<NotificationKind> {
    match status {
        ApplicationStatus::Shortlisted => Some(NotificationKind::Interview),
        ApplicationStatus::Rejected => Some(NotificationKind::Rejection),
        ApplicationStatus::Pending | ApplicationStatus::Reviewed => None,
    }
}

fn pick(requested: Option<String>, fallback: &str) -> String {
    requested
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| fallback.to_string())
}

fn build_decision(
    application: &JobApplication,
    request: StatusUpdateRequest,
    defaults: &NotificationDefaults,
    kind: NotificationKind,
) -> Decision {
    Decision {
        user_id: application.candidate_id.clone(),
        email: pick(request.candidate_email, &application.candidate_email),
        candidate_name: pick(request.candidate_name, &application.candidate_name),
        job_title: pick(request.job_title, &application.job_title),
        company_name: pick(request.company_name, &defaults.company_name),
        hr_name: pick(request.hr_name, &defaults.hr_name),
        kind,
    }
}

pub async fn transition_status(
    store: &dyn ApplicationStore,
    channel: &dyn NotificationChannel,
    defaults: &NotificationDefaults,
    caller: &Caller,
    id: Uuid,
    request: StatusUpdateRequest,
) -> Result<TransitionOutcome, AppError> {
    let application = store
        .fetch_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Application {id} not found")))?;

    let previous = application.status;
    let target = request.status;

    // Repeated identical requests must not send a second message.
    if previous == target {
        debug!("Caller {caller} re-sent status {target} for application {id}; skipping");
        return Ok(TransitionOutcome::Unchanged);
    }

    store.update_status(id, target).await?;
    info!("Caller {caller} moved application {id} from {previous} to {target}");

    let Some(kind) = notification_for(target) else {
        return Ok(TransitionOutcome::Updated);
    };

    let decision = build_decision(&application, request, defaults, kind);
    channel.deliver(&decision).await?;
    info!(
        "Sent {} notification via {} for application {id}",
        kind.as_str(),
        channel.name()
    );

    Ok(TransitionOutcome::Notified)
}
