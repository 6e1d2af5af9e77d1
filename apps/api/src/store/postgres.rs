use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use crate::models::application::{ApplicationRow, ApplicationStatus, JobApplication};
use crate::models::notification::{Notification, NotificationRow};
use crate::models::post::{HiringPost, HiringPostRow, PostStatus};
use crate::store::{ApplicationStore, NotificationStore, PostStore, StoreError};

#[derive(Clone)]
pub struct PgPostStore {
    pool: PgPool,
}

impl PgPostStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn into_post(row: HiringPostRow) -> Result<HiringPost, StoreError> {
    HiringPost::try_from(row).map_err(|e| StoreError::Corrupt(e.to_string()))
}

#[async_trait]
impl PostStore for PgPostStore {
    async fn insert(&self, post: &HiringPost) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO hiring_posts
                (id, hr_id, company_name, title, description, location, job_type,
                 salary_range, requirements, responsibilities, status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(post.id)
        .bind(&post.hr_id)
        .bind(&post.company_name)
        .bind(&post.title)
        .bind(&post.description)
        .bind(&post.location)
        .bind(&post.job_type)
        .bind(&post.salary_range)
        .bind(&post.requirements)
        .bind(&post.responsibilities)
        .bind(post.status.as_str())
        .bind(post.created_at)
        .execute(&self.pool)
        .await?;

        debug!("Inserted hiring post {}", post.id);
        Ok(())
    }

    async fn fetch_by_id(&self, id: Uuid) -> Result<Option<HiringPost>, StoreError> {
        sqlx::query_as::<_, HiringPostRow>("SELECT * FROM hiring_posts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(into_post)
            .transpose()
    }

    async fn fetch_by_recruiter(&self, hr_id: &str) -> Result<Vec<HiringPost>, StoreError> {
        sqlx::query_as::<_, HiringPostRow>(
            "SELECT * FROM hiring_posts WHERE hr_id = $1 ORDER BY created_at DESC",
        )
        .bind(hr_id)
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .map(into_post)
        .collect()
    }

    async fn fetch_active(&self) -> Result<Vec<HiringPost>, StoreError> {
        sqlx::query_as::<_, HiringPostRow>(
            "SELECT * FROM hiring_posts WHERE status = $1 ORDER BY created_at DESC",
        )
        .bind(PostStatus::Active.as_str())
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .map(into_post)
        .collect()
    }
}

#[derive(Clone)]
pub struct PgApplicationStore {
    pool: PgPool,
}

impl PgApplicationStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn into_application(row: ApplicationRow) -> Result<JobApplication, StoreError> {
    JobApplication::try_from(row).map_err(|e| StoreError::Corrupt(e.to_string()))
}

#[async_trait]
impl ApplicationStore for PgApplicationStore {
    async fn insert(&self, application: &JobApplication) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO job_applications
                (id, candidate_id, candidate_name, candidate_email, candidate_phone,
                 job_title, post_id, hr_id, status, resume_url, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(application.id)
        .bind(&application.candidate_id)
        .bind(&application.candidate_name)
        .bind(&application.candidate_email)
        .bind(&application.candidate_phone)
        .bind(&application.job_title)
        .bind(&application.post_id)
        .bind(&application.hr_id)
        .bind(application.status.as_str())
        .bind(&application.resume_url)
        .bind(application.created_at)
        .execute(&self.pool)
        .await?;

        debug!("Inserted application {}", application.id);
        Ok(())
    }

    async fn fetch_by_id(&self, id: Uuid) -> Result<Option<JobApplication>, StoreError> {
        sqlx::query_as::<_, ApplicationRow>("SELECT * FROM job_applications WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(into_application)
            .transpose()
    }

    async fn fetch_by_recruiter(&self, hr_id: &str) -> Result<Vec<JobApplication>, StoreError> {
        sqlx::query_as::<_, ApplicationRow>(
            "SELECT * FROM job_applications WHERE hr_id = $1 ORDER BY created_at DESC",
        )
        .bind(hr_id)
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .map(into_application)
        .collect()
    }

    async fn update_status(&self, id: Uuid, status: ApplicationStatus) -> Result<(), StoreError> {
        // Plain overwrite, no compare-and-swap.
        let result = sqlx::query("UPDATE job_applications SET status = $1 WHERE id = $2")
            .bind(status.as_str())
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }
}

#[derive(Clone)]
pub struct PgNotificationStore {
    pool: PgPool,
}

impl PgNotificationStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotificationStore for PgNotificationStore {
    async fn insert(&self, notification: &Notification) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO notifications (id, user_id, title, message, kind, read, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(notification.id)
        .bind(&notification.user_id)
        .bind(&notification.title)
        .bind(&notification.message)
        .bind(notification.kind.as_str())
        .bind(notification.read)
        .bind(notification.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn list_for_user(&self, user_id: &str) -> Result<Vec<Notification>, StoreError> {
        sqlx::query_as::<_, NotificationRow>(
            "SELECT * FROM notifications WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .map(|row| Notification::try_from(row).map_err(|e| StoreError::Corrupt(e.to_string())))
        .collect()
    }

    async fn mark_read(&self, id: Uuid) -> Result<(), StoreError> {
        let result = sqlx::query("UPDATE notifications SET read = true WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }
}
