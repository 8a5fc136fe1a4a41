use crate::models::{MediaPayload, MediaRecord, MediaUpload, StudentInput, StudentRecord};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::watch;

/// Storage-layer error taxonomy. Validation failures abort before anything
/// is persisted; backend failures are logged and surfaced generically with
/// no retry, whether transient or not.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0}")]
    Validation(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Backend error: {0}")]
    Backend(#[from] anyhow::Error),
}

impl From<sea_orm::DbErr> for StoreError {
    fn from(e: sea_orm::DbErr) -> Self {
        StoreError::Backend(e.into())
    }
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Backend(e.into())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Backend(e.into())
    }
}

/// The single persistence seam. One implementation talks to the remote
/// backend (document rows + blob storage), the other keeps everything in
/// local JSON blobs; callers never branch on mode.
///
/// Subscriptions re-deliver the full, ordered result set on every observed
/// change. Dropping the receiver is the teardown.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Full student set, ordered by display name ascending.
    async fn list_students(&self) -> Result<Vec<StudentRecord>, StoreError>;

    /// Create a student, or overwrite the record matched by `row_id`.
    /// Updating never reassigns the row identifier.
    async fn upsert_student(
        &self,
        input: StudentInput,
        row_id: Option<String>,
    ) -> Result<StudentRecord, StoreError>;

    /// Unconditional delete by row identifier. Media owned by the student
    /// is left untouched (orphaning is expected behavior).
    async fn remove_student(&self, row_id: &str) -> Result<(), StoreError>;

    /// Succeeds iff exactly one record matches both identifier and password,
    /// returning that record's display name. All failures collapse into the
    /// same generic error.
    async fn authenticate(&self, student_id: &str, password: &str)
        -> Result<String, StoreError>;

    /// Full media set newest-first, optionally restricted to one owner.
    async fn list_media(&self, owner: Option<&str>) -> Result<Vec<MediaRecord>, StoreError>;

    /// Persist a new media record and its payload via the mode-appropriate
    /// path (blob upload + URL, or embedded data URI).
    async fn create_media(
        &self,
        upload: MediaUpload,
        payload: MediaPayload,
    ) -> Result<MediaRecord, StoreError>;

    /// Delete a media record. Underlying payload cleanup is best effort.
    async fn remove_media(&self, row_id: &str) -> Result<(), StoreError>;

    fn subscribe_students(&self) -> watch::Receiver<Arc<Vec<StudentRecord>>>;

    fn subscribe_media(&self) -> watch::Receiver<Arc<Vec<MediaRecord>>>;
}

/// Declared sort key for student listings.
pub fn sort_students(records: &mut [StudentRecord]) {
    records.sort_by(|a, b| a.name.cmp(&b.name));
}

/// Declared sort key for media listings: reverse-chronological upload time.
pub fn sort_media(records: &mut [MediaRecord]) {
    records.sort_by(|a, b| b.uploaded_at.cmp(&a.uploaded_at));
}

/// Owner restriction is plain string equality against the business id.
pub fn filter_owner(records: Vec<MediaRecord>, owner: Option<&str>) -> Vec<MediaRecord> {
    match owner {
        Some(owner) => records
            .into_iter()
            .filter(|m| m.student_id == owner)
            .collect(),
        None => records,
    }
}
