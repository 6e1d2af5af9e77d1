use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::post::HiringPost;

/// Review state of a job application. Recruiters may move between any two
/// states; only `shortlisted` and `rejected` tell the candidate anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Pending,
    Reviewed,
    Shortlisted,
    Rejected,
}

impl ApplicationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Reviewed => "reviewed",
            ApplicationStatus::Shortlisted => "shortlisted",
            ApplicationStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown application status '{0}'")]
pub struct UnknownStatus(pub String);

impl FromStr for ApplicationStatus {
    type Err = UnknownStatus;

    /// Exact, case-sensitive match on the lowercase wire names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ApplicationStatus::Pending),
            "reviewed" => Ok(ApplicationStatus::Reviewed),
            "shortlisted" => Ok(ApplicationStatus::Shortlisted),
            "rejected" => Ok(ApplicationStatus::Rejected),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// A candidate's submission against a hiring post.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobApplication {
    pub id: Uuid,
    pub candidate_id: String,
    pub candidate_name: String,
    pub candidate_email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub candidate_phone: Option<String>,
    pub job_title: String,
    pub post_id: Uuid,
    pub hr_id: String,
    pub status: ApplicationStatus,
    pub resume_url: String,
    pub created_at: DateTime<Utc>,
}

impl JobApplication {
    /// Builds a freshly submitted application against `post`: new id,
    /// `pending`, stamped now. Job title and owning recruiter come from the post.
    pub fn submit(new: NewApplication, post: &HiringPost) -> Self {
        Self {
            id: Uuid::new_v4(),
            candidate_id: new.candidate_id,
            candidate_name: new.candidate_name,
            candidate_email: new.candidate_email,
            candidate_phone: new.candidate_phone,
            job_title: post.title.clone(),
            post_id: post.id,
            hr_id: post.hr_id.clone(),
            status: ApplicationStatus::Pending,
            resume_url: new.resume_url,
            created_at: Utc::now(),
        }
    }
}

/// Submission payload for `POST /applications`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewApplication {
    pub candidate_id: String,
    pub candidate_name: String,
    pub candidate_email: String,
    #[serde(default)]
    pub candidate_phone: Option<String>,
    pub post_id: Uuid,
    pub resume_url: String,
}

impl NewApplication {
    /// Returns the name of the first required field that is blank.
    pub fn first_blank_field(&self) -> Option<&'static str> {
        [
            ("candidateId", &self.candidate_id),
            ("candidateName", &self.candidate_name),
            ("candidateEmail", &self.candidate_email),
            ("resumeUrl", &self.resume_url),
        ]
        .into_iter()
        .find(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct ApplicationRow {
    pub id: Uuid,
    pub candidate_id: String,
    pub candidate_name: String,
    pub candidate_email: String,
    pub candidate_phone: Option<String>,
    pub job_title: String,
    pub post_id: Uuid,
    pub hr_id: String,
    pub status: String,
    pub resume_url: String,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<ApplicationRow> for JobApplication {
    type Error = UnknownStatus;

    fn try_from(row: ApplicationRow) -> Result<Self, Self::Error> {
        Ok(Self {
            status: row.status.parse()?,
            id: row.id,
            candidate_id: row.candidate_id,
            candidate_name: row.candidate_name,
            candidate_email: row.candidate_email,
            candidate_phone: row.candidate_phone,
            job_title: row.job_title,
            post_id: row.post_id,
            hr_id: row.hr_id,
            resume_url: row.resume_url,
            created_at: row.created_at,
        })
    }
}
