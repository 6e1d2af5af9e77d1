use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Whether a hiring post still accepts applications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Active,
    Closed,
}

impl PostStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            PostStatus::Active => "active",
            PostStatus::Closed => "closed",
        }
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown post status '{0}'")]
pub struct UnknownPostStatus(pub String);

impl FromStr for PostStatus {
    type Err = UnknownPostStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(PostStatus::Active),
            "closed" => Ok(PostStatus::Closed),
            other => Err(UnknownPostStatus(other.to_string())),
        }
    }
}

/// A job opening published by a recruiter. Applications point at one.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HiringPost {
    pub id: Uuid,
    pub hr_id: String,
    pub company_name: String,
    pub title: String,
    pub description: String,
    pub location: String,
    pub job_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary_range: Option<String>,
    pub requirements: Vec<String>,
    pub responsibilities: Vec<String>,
    pub status: PostStatus,
    pub created_at: DateTime<Utc>,
}

impl HiringPost {
    /// New posts are `active` and stamped now.
    pub fn publish(new: NewHiringPost) -> Self {
        Self {
            id: Uuid::new_v4(),
            hr_id: new.hr_id,
            company_name: new.company_name,
            title: new.title,
            description: new.description,
            location: new.location,
            job_type: new.job_type,
            salary_range: new.salary_range.filter(|s| !s.trim().is_empty()),
            requirements: new.requirements,
            responsibilities: new.responsibilities,
            status: PostStatus::Active,
            created_at: Utc::now(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.status == PostStatus::Active
    }
}

/// Payload for `POST /hr/posts`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewHiringPost {
    pub hr_id: String,
    pub company_name: String,
    pub title: String,
    pub description: String,
    pub location: String,
    pub job_type: String,
    #[serde(default)]
    pub salary_range: Option<String>,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default)]
    pub responsibilities: Vec<String>,
}

impl NewHiringPost {
    pub fn first_blank_field(&self) -> Option<&'static str> {
        [
            ("hrId", &self.hr_id),
            ("companyName", &self.company_name),
            ("title", &self.title),
            ("description", &self.description),
            ("location", &self.location),
            ("jobType", &self.job_type),
        ]
        .into_iter()
        .find(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct HiringPostRow {
    pub id: Uuid,
    pub hr_id: String,
    pub company_name: String,
    pub title: String,
    pub description: String,
    pub location: String,
    pub job_type: String,
    pub salary_range: Option<String>,
    pub requirements: Vec<String>,
    pub responsibilities: Vec<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<HiringPostRow> for HiringPost {
    type Error = UnknownPostStatus;

    fn try_from(row: HiringPostRow) -> Result<Self, Self::Error> {
        Ok(Self {
            status: row.status.parse()?,
            id: row.id,
            hr_id: row.hr_id,
            company_name: row.company_name,
            title: row.title,
            description: row.description,
            location: row.location,
            job_type: row.job_type,
            salary_range: row.salary_range,
            requirements: row.requirements,
            responsibilities: row.responsibilities,
            created_at: row.created_at,
        })
    }
}
