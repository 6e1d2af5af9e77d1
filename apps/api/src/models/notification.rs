use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Outcome a notification tells the candidate about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum NotificationKind {
    Interview,
    Rejection,
}

impl NotificationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            NotificationKind::Interview => "INTERVIEW",
            NotificationKind::Rejection => "REJECTION",
        }
    }

}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown notification kind '{0}'")]
pub struct UnknownKind(pub String);

impl FromStr for NotificationKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "INTERVIEW" => Ok(NotificationKind::Interview),
            "REJECTION" => Ok(NotificationKind::Rejection),
            other => Err(UnknownKind(other.to_string())),
        }
    }
}

/// In-app notification record. Only `read` ever changes after creation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: Uuid,
    pub user_id: String,
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn unread(user_id: String, title: String, message: String, kind: NotificationKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            title,
            message,
            kind,
            read: false,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct NotificationRow {
    pub id: Uuid,
    pub user_id: String,
    pub title: String,
    pub message: String,
    pub kind: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<NotificationRow> for Notification {
    type Error = UnknownKind;

    fn try_from(row: NotificationRow) -> Result<Self, Self::Error> {
        let kind = row.kind.parse()?;
        Ok(Self {
            id: row.id,
            user_id: row.user_id,
            title: row.title,
            message: row.message,
            kind,
            read: row.read,
            created_at: row.created_at,
        })
    }
}
