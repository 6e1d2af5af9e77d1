//! Persistence seams for hiring posts, applications and in-app notifications.
//!
//! Handlers and the transition service only see the traits; `AppState` carries
//! them as `Arc<dyn ...>` so the Postgres backends can be swapped for
//! in-memory ones under test.
//!
//! There is no version token on application rows: two concurrent status
//! writes race and the last one wins.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::application::{ApplicationStatus, JobApplication};
use crate::models::notification::Notification;
use crate::models::post::HiringPost;

pub mod postgres;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record {0} not found")]
    NotFound(Uuid),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("corrupt record: {0}")]
    Corrupt(String),
}

#[async_trait]
pub trait PostStore: Send + Sync {
    async fn insert(&self, post: &HiringPost) -> Result<(), StoreError>;

    async fn fetch_by_id(&self, id: Uuid) -> Result<Option<HiringPost>, StoreError>;

    /// Every post a recruiter published, open or closed, newest first.
    async fn fetch_by_recruiter(&self, hr_id: &str) -> Result<Vec<HiringPost>, StoreError>;

    /// Open posts across all recruiters, newest first.
    async fn fetch_active(&self) -> Result<Vec<HiringPost>, StoreError>;
}

#[async_trait]
pub trait ApplicationStore: Send + Sync {
    async fn insert(&self, application: &JobApplication) -> Result<(), StoreError>;

    async fn fetch_by_id(&self, id: Uuid) -> Result<Option<JobApplication>, StoreError>;

    /// All applications owned by a recruiter, newest first.
    async fn fetch_by_recruiter(&self, hr_id: &str) -> Result<Vec<JobApplication>, StoreError>;

    /// Overwrites the stored status. A missing row is `StoreError::NotFound`.
    async fn update_status(&self, id: Uuid, status: ApplicationStatus) -> Result<(), StoreError>;
}

#[async_trait]
pub trait NotificationStore: Send + Sync {
    async fn insert(&self, notification: &Notification) -> Result<(), StoreError>;

    /// A user's notifications, newest first.
    async fn list_for_user(&self, user_id: &str) -> Result<Vec<Notification>, StoreError>;

    /// Sets `read = true`. Already-read records are left as they are.
    async fn mark_read(&self, id: Uuid) -> Result<(), StoreError>;
}
