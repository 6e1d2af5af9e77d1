//! In-memory collaborators for unit and router tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use uuid::Uuid;

use crate::applications::transition::NotificationDefaults;
use crate::errors::AppError;
use crate::models::application::{ApplicationStatus, JobApplication, NewApplication};
use crate::models::notification::Notification;
use crate::models::post::{HiringPost, NewHiringPost, PostStatus};
use crate::notify::in_app::InAppChannel;
use crate::notify::templates::{render, RenderedMessage};
use crate::notify::{Decision, DispatchError, NotificationChannel};
use crate::state::AppState;
use crate::store::{ApplicationStore, NotificationStore, PostStore, StoreError};
use crate::uploads::{public_url, ObjectStore};

pub const TEST_PUBLIC_URL: &str = "https://files.test";

pub fn defaults() -> NotificationDefaults {
    NotificationDefaults {
        company_name: "Our Company".to_string(),
        hr_name: "HR Team".to_string(),
    }
}

/// Active "Backend Engineer" post at Acme, published by `hr-1`.
pub fn sample_post() -> HiringPost {
    HiringPost::publish(NewHiringPost {
        hr_id: "hr-1".to_string(),
        company_name: "Acme".to_string(),
        title: "Backend Engineer".to_string(),
        description: "Own the hiring API".to_string(),
        location: "Remote".to_string(),
        job_type: "Full-time".to_string(),
        salary_range: None,
        requirements: vec!["Rust".to_string()],
        responsibilities: vec!["APIs".to_string()],
    })
}

/// Pending application from Jane against a fresh [`sample_post`].
pub fn sample_application() -> JobApplication {
    let post = sample_post();
    JobApplication::submit(
        NewApplication {
            candidate_id: "cand-1".to_string(),
            candidate_name: "Jane".to_string(),
            candidate_email: "jane@x.com".to_string(),
            candidate_phone: None,
            post_id: post.id,
            resume_url: "https://files.test/uploads/1-jane.pdf".to_string(),
        },
        &post,
    )
}

fn unavailable() -> StoreError {
    StoreError::Database(sqlx::Error::PoolTimedOut)
}

#[derive(Default)]
pub struct MemoryPostStore {
    records: Mutex<Vec<HiringPost>>,
}

impl MemoryPostStore {
    fn newest_first(&self, keep: impl Fn(&HiringPost) -> bool) -> Vec<HiringPost> {
        let mut found: Vec<_> = self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|p| keep(p))
            .cloned()
            .collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        found
    }
}

#[async_trait]
impl PostStore for MemoryPostStore {
    async fn insert(&self, post: &HiringPost) -> Result<(), StoreError> {
        self.records.lock().unwrap().push(post.clone());
        Ok(())
    }

    async fn fetch_by_id(&self, id: Uuid) -> Result<Option<HiringPost>, StoreError> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == id)
            .cloned())
    }

    async fn fetch_by_recruiter(&self, hr_id: &str) -> Result<Vec<HiringPost>, StoreError> {
        Ok(self.newest_first(|p| p.hr_id == hr_id))
    }

    async fn fetch_active(&self) -> Result<Vec<HiringPost>, StoreError> {
        Ok(self.newest_first(|p| p.status == PostStatus::Active))
    }
}

#[derive(Default)]
pub struct MemoryApplicationStore {
    records: Mutex<HashMap<Uuid, JobApplication>>,
    status_writes: Mutex<usize>,
}

impl MemoryApplicationStore {
    pub fn status_of(&self, id: Uuid) -> Option<ApplicationStatus> {
        self.records.lock().unwrap().get(&id).map(|a| a.status)
    }

    /// Number of `update_status` calls that reached the store.
    pub fn write_count(&self) -> usize {
        *self.status_writes.lock().unwrap()
    }
}

#[async_trait]
impl ApplicationStore for MemoryApplicationStore {
    async fn insert(&self, application: &JobApplication) -> Result<(), StoreError> {
        self.records
            .lock()
            .unwrap()
            .insert(application.id, application.clone());
        Ok(())
    }

    async fn fetch_by_id(&self, id: Uuid) -> Result<Option<JobApplication>, StoreError> {
        Ok(self.records.lock().unwrap().get(&id).cloned())
    }

    async fn fetch_by_recruiter(&self, hr_id: &str) -> Result<Vec<JobApplication>, StoreError> {
        let mut found: Vec<_> = self
            .records
            .lock()
            .unwrap()
            .values()
            .filter(|a| a.hr_id == hr_id)
            .cloned()
            .collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(found)
    }

    async fn update_status(&self, id: Uuid, status: ApplicationStatus) -> Result<(), StoreError> {
        *self.status_writes.lock().unwrap() += 1;
        match self.records.lock().unwrap().get_mut(&id) {
            Some(record) => {
                record.status = status;
                Ok(())
            }
            None => Err(StoreError::NotFound(id)),
        }
    }
}

/// Serves one application but refuses every write.
pub struct FailingApplicationStore {
    pub application: JobApplication,
}

impl FailingApplicationStore {
    pub fn with(application: JobApplication) -> Self {
        Self { application }
    }
}

#[async_trait]
impl ApplicationStore for FailingApplicationStore {
    async fn insert(&self, _application: &JobApplication) -> Result<(), StoreError> {
        Err(unavailable())
    }

    async fn fetch_by_id(&self, id: Uuid) -> Result<Option<JobApplication>, StoreError> {
        Ok((id == self.application.id).then(|| self.application.clone()))
    }

    async fn fetch_by_recruiter(&self, _hr_id: &str) -> Result<Vec<JobApplication>, StoreError> {
        Err(unavailable())
    }

    async fn update_status(&self, _id: Uuid, _status: ApplicationStatus) -> Result<(), StoreError> {
        Err(unavailable())
    }
}

#[derive(Default)]
pub struct MemoryNotificationStore {
    records: Mutex<Vec<Notification>>,
}

#[async_trait]
impl NotificationStore for MemoryNotificationStore {
    async fn insert(&self, notification: &Notification) -> Result<(), StoreError> {
        self.records.lock().unwrap().push(notification.clone());
        Ok(())
    }

    async fn list_for_user(&self, user_id: &str) -> Result<Vec<Notification>, StoreError> {
        let mut found: Vec<_> = self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|n| n.user_id == user_id)
            .cloned()
            .collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(found)
    }

    async fn mark_read(&self, id: Uuid) -> Result<(), StoreError> {
        let mut records = self.records.lock().unwrap();
        let record = records
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or(StoreError::NotFound(id))?;
        record.read = true;
        Ok(())
    }
}

pub struct FailingNotificationStore;

#[async_trait]
impl NotificationStore for FailingNotificationStore {
    async fn insert(&self, _notification: &Notification) -> Result<(), StoreError> {
        Err(unavailable())
    }

    async fn list_for_user(&self, _user_id: &str) -> Result<Vec<Notification>, StoreError> {
        Err(unavailable())
    }

    async fn mark_read(&self, _id: Uuid) -> Result<(), StoreError> {
        Err(unavailable())
    }
}

/// Records every decision it is asked to deliver; optionally rejects them.
#[derive(Default)]
pub struct RecordingChannel {
    sent: Mutex<Vec<Decision>>,
    reject: bool,
}

impl RecordingChannel {
    pub fn failing() -> Self {
        Self {
            sent: Mutex::default(),
            reject: true,
        }
    }

    pub fn sent(&self) -> Vec<Decision> {
        self.sent.lock().unwrap().clone()
    }

    pub fn rendered(&self) -> Vec<RenderedMessage> {
        self.sent().iter().map(render).collect()
    }
}

#[async_trait]
impl NotificationChannel for RecordingChannel {
    fn name(&self) -> &'static str {
        "recording"
    }

    async fn deliver(&self, decision: &Decision) -> Result<(), DispatchError> {
        if self.reject {
            return Err(DispatchError::Rejected {
                status: 401,
                message: "invalid API key".to_string(),
            });
        }
        self.sent.lock().unwrap().push(decision.clone());
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryObjectStore {
    objects: Mutex<HashMap<String, (Bytes, String)>>,
}

impl MemoryObjectStore {
    pub fn get(&self, key: &str) -> Option<(Bytes, String)> {
        self.objects.lock().unwrap().get(key).cloned()
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn put(&self, key: &str, body: Bytes, content_type: &str) -> Result<String, AppError> {
        self.objects
            .lock()
            .unwrap()
            .insert(key.to_string(), (body, content_type.to_string()));
        Ok(public_url(TEST_PUBLIC_URL, key))
    }
}

/// Router-level fixture: `AppState` over in-memory stores with handles kept
/// for assertions.
pub struct TestApp {
    pub state: AppState,
    pub posts: Arc<MemoryPostStore>,
    pub applications: Arc<MemoryApplicationStore>,
    pub notifications: Arc<MemoryNotificationStore>,
    pub channel: Arc<RecordingChannel>,
    pub objects: Arc<MemoryObjectStore>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::build(Arc::new(RecordingChannel::default()), false)
    }

    pub fn with_failing_channel() -> Self {
        Self::build(Arc::new(RecordingChannel::failing()), false)
    }

    /// Decisions go through `InAppChannel` into `notifications`.
    pub fn in_app() -> Self {
        Self::build(Arc::new(RecordingChannel::default()), true)
    }

    fn build(channel: Arc<RecordingChannel>, in_app: bool) -> Self {
        let posts = Arc::new(MemoryPostStore::default());
        let applications = Arc::new(MemoryApplicationStore::default());
        let notifications = Arc::new(MemoryNotificationStore::default());
        let objects = Arc::new(MemoryObjectStore::default());
        let active: Arc<dyn NotificationChannel> = if in_app {
            Arc::new(InAppChannel::new(notifications.clone()))
        } else {
            channel.clone()
        };

        let state = AppState {
            posts: posts.clone(),
            applications: applications.clone(),
            notifications: notifications.clone(),
            channel: active,
            objects: objects.clone(),
            defaults: defaults(),
            max_upload_bytes: 1024,
        };

        Self {
            state,
            posts,
            applications,
            notifications,
            channel,
            objects,
        }
    }

    pub async fn seed_post(&self, post: HiringPost) -> HiringPost {
        self.posts.insert(&post).await.unwrap();
        post
    }

    pub async fn seed(&self, application: JobApplication) -> JobApplication {
        self.applications.insert(&application).await.unwrap();
        application
    }
}
