use crate::entities::{media, prelude::*, students};
use crate::models::{MediaKind, MediaPayload, MediaRecord, MediaUpload, StudentInput, StudentRecord};
use crate::services::blob::BlobStore;
use crate::services::store::{Storage, StoreError};
use crate::utils::auth::{hash_password, verify_password};
use crate::utils::validation::{validate_media, validate_student};
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::warn;
use uuid::Uuid;

/// Remote-mode storage: student and media rows live in the SQL backend,
/// payloads in the blob store. Every successful write re-queries the
/// affected collection and re-broadcasts it, so subscribers always see the
/// full current result set.
pub struct RemoteStore {
    db: DatabaseConnection,
    blob: Arc<dyn BlobStore>,
    students_tx: watch::Sender<Arc<Vec<StudentRecord>>>,
    media_tx: watch::Sender<Arc<Vec<MediaRecord>>>,
}

impl RemoteStore {
    pub async fn new(db: DatabaseConnection, blob: Arc<dyn BlobStore>) -> Result<Self, StoreError> {
        let students = Self::query_students(&db).await?;
        let media = Self::query_media(&db).await?;
        let (students_tx, _) = watch::channel(Arc::new(students));
        let (media_tx, _) = watch::channel(Arc::new(media));

        Ok(Self {
            db,
            blob,
            students_tx,
            media_tx,
        })
    }

    async fn query_students(db: &DatabaseConnection) -> Result<Vec<StudentRecord>, StoreError> {
        let rows = Students::find()
            .order_by_asc(students::Column::Name)
            .all(db)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn query_media(db: &DatabaseConnection) -> Result<Vec<MediaRecord>, StoreError> {
        let rows = Media::find()
            .order_by_desc(media::Column::UploadedAt)
            .all(db)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn broadcast_students(&self) -> Result<(), StoreError> {
        let records = Self::query_students(&self.db).await?;
        self.students_tx.send_replace(Arc::new(records));
        Ok(())
    }

    async fn broadcast_media(&self) -> Result<(), StoreError> {
        let records = Self::query_media(&self.db).await?;
        self.media_tx.send_replace(Arc::new(records));
        Ok(())
    }
}

#[async_trait]
impl Storage for RemoteStore {
    async fn list_students(&self) -> Result<Vec<StudentRecord>, StoreError> {
        Self::query_students(&self.db).await
    }

    async fn upsert_student(
        &self,
        input: StudentInput,
        row_id: Option<String>,
    ) -> Result<StudentRecord, StoreError> {
        validate_student(&input)?;
        let password_hash = hash_password(&input.password)?;

        let record = match row_id {
            Some(id) => {
                let existing = Students::find_by_id(id.clone())
                    .one(&self.db)
                    .await?
                    .ok_or_else(|| StoreError::NotFound(format!("student {id}")))?;

                let model = students::ActiveModel {
                    id: Set(existing.id),
                    student_id: Set(input.student_id),
                    password_hash: Set(password_hash),
                    name: Set(input.name),
                    roll_number: Set(input.roll_number),
                    class_name: Set(input.class_name),
                    section: Set(input.section),
                    email: Set(input.email),
                    phone: Set(input.phone),
                };
                model.update(&self.db).await?
            }
            None => {
                let model = students::ActiveModel {
                    id: Set(Uuid::new_v4().to_string()),
                    student_id: Set(input.student_id),
                    password_hash: Set(password_hash),
                    name: Set(input.name),
                    roll_number: Set(input.roll_number),
                    class_name: Set(input.class_name),
                    section: Set(input.section),
                    email: Set(input.email),
                    phone: Set(input.phone),
                };
                model.insert(&self.db).await?
            }
        };

        self.broadcast_students().await?;
        Ok(record.into())
    }

    async fn remove_student(&self, row_id: &str) -> Result<(), StoreError> {
        let res = Students::delete_by_id(row_id.to_string())
            .exec(&self.db)
            .await?;
        if res.rows_affected == 0 {
            return Err(StoreError::NotFound(format!("student {row_id}")));
        }
        self.broadcast_students().await?;
        Ok(())
    }

    async fn authenticate(
        &self,
        student_id: &str,
        password: &str,
    ) -> Result<String, StoreError> {
        let candidates = Students::find()
            .filter(students::Column::StudentId.eq(student_id))
            .all(&self.db)
            .await?;

        let mut matches = candidates
            .into_iter()
            .filter(|s| verify_password(password, &s.password_hash));

        match (matches.next(), matches.next()) {
            (Some(student), None) => Ok(student.name),
            _ => Err(StoreError::InvalidCredentials),
        }
    }

    async fn list_media(&self, owner: Option<&str>) -> Result<Vec<MediaRecord>, StoreError> {
        let mut query = Media::find().order_by_desc(media::Column::UploadedAt);
        if let Some(owner) = owner {
            query = query.filter(media::Column::StudentId.eq(owner));
        }
        let rows = query.all(&self.db).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn create_media(
        &self,
        upload: MediaUpload,
        payload: MediaPayload,
    ) -> Result<MediaRecord, StoreError> {
        validate_media(&upload, &payload)?;

        let uploaded_at = Utc::now();
        let kind = MediaKind::from_content_type(&payload.content_type);
        // Timestamp-prefixed blob name, recorded so deletion can find it
        let file_name = format!("{}_{}", uploaded_at.timestamp_millis(), payload.file_name);
        let key = format!("media/{file_name}");

        // If the record insert below fails, this blob is orphaned; there is
        // no cleanup pass
        let url = self
            .blob
            .upload(&key, &payload.content_type, payload.bytes)
            .await
            .map_err(StoreError::Backend)?;

        let model = media::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            title: Set(upload.title),
            description: Set(upload.description),
            url: Set(url),
            kind: Set(kind.as_str().to_string()),
            student_id: Set(upload.student_id),
            uploaded_at: Set(uploaded_at),
            file_name: Set(file_name),
        };
        let record = model.insert(&self.db).await?;

        self.broadcast_media().await?;
        Ok(record.into())
    }

    async fn remove_media(&self, row_id: &str) -> Result<(), StoreError> {
        let record = Media::find_by_id(row_id.to_string())
            .one(&self.db)
            .await?
            .ok_or_else(|| StoreError::NotFound(format!("media {row_id}")))?;

        Media::delete_by_id(row_id.to_string())
            .exec(&self.db)
            .await?;

        let key = format!("media/{}", record.file_name);
        if let Err(e) = self.blob.delete(&key).await {
            warn!("Blob cleanup for '{}' failed (ignored): {}", key, e);
        }

        self.broadcast_media().await?;
        Ok(())
    }

    fn subscribe_students(&self) -> watch::Receiver<Arc<Vec<StudentRecord>>> {
        self.students_tx.subscribe()
    }

    fn subscribe_media(&self) -> watch::Receiver<Arc<Vec<MediaRecord>>> {
        self.media_tx.subscribe()
    }
}
