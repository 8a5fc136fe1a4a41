use crate::models::{MediaKind, MediaPayload, MediaRecord, MediaUpload, StudentInput, StudentRecord};
use crate::services::store::{Storage, StoreError, filter_owner, sort_media, sort_students};
use crate::utils::auth::{hash_password, verify_password};
use crate::utils::validation::{validate_media, validate_student};
use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::Utc;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::{Mutex, watch};

/// Fixed keys the full record sets serialize under, one JSON blob each.
pub const STUDENTS_KEY: &str = "classX_students";
pub const MEDIA_KEY: &str = "classX_media";

/// Synchronous string key-value store scoped to one directory, one file per
/// key. No expiry, no quota check.
pub struct KvStore {
    dir: PathBuf,
}

impl KvStore {
    pub fn open(dir: impl Into<PathBuf>) -> io::Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    pub fn get(&self, key: &str) -> io::Result<Option<String>> {
        match std::fs::read_to_string(self.path(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub fn set(&self, key: &str, value: &str) -> io::Result<()> {
        std::fs::write(self.path(key), value)
    }
}

/// Local-mode storage. Every write reads the full blob, mutates the
/// in-memory collection and rewrites the full blob; there are no partial
/// updates and no conflict detection against other processes on the same
/// directory. Payloads are embedded as data URIs with no size ceiling, and
/// row ids are the current milliseconds since epoch (two creates within the
/// same millisecond collide, unguarded).
pub struct LocalStore {
    kv: KvStore,
    write_lock: Mutex<()>,
    students_tx: watch::Sender<Arc<Vec<StudentRecord>>>,
    media_tx: watch::Sender<Arc<Vec<MediaRecord>>>,
}

impl LocalStore {
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let kv = KvStore::open(dir)?;
        let mut students = Self::load_students(&kv)?;
        let mut media = Self::load_media(&kv)?;
        sort_students(&mut students);
        sort_media(&mut media);

        let (students_tx, _) = watch::channel(Arc::new(students));
        let (media_tx, _) = watch::channel(Arc::new(media));

        Ok(Self {
            kv,
            write_lock: Mutex::new(()),
            students_tx,
            media_tx,
        })
    }

    fn load_students(kv: &KvStore) -> Result<Vec<StudentRecord>, StoreError> {
        match kv.get(STUDENTS_KEY)? {
            Some(blob) => Ok(serde_json::from_str(&blob)?),
            None => Ok(Vec::new()),
        }
    }

    fn load_media(kv: &KvStore) -> Result<Vec<MediaRecord>, StoreError> {
        match kv.get(MEDIA_KEY)? {
            Some(blob) => Ok(serde_json::from_str(&blob)?),
            None => Ok(Vec::new()),
        }
    }

    fn save_students(&self, records: &[StudentRecord]) -> Result<(), StoreError> {
        self.kv.set(STUDENTS_KEY, &serde_json::to_string(records)?)?;
        let mut sorted = records.to_vec();
        sort_students(&mut sorted);
        self.students_tx.send_replace(Arc::new(sorted));
        Ok(())
    }

    fn save_media(&self, records: &[MediaRecord]) -> Result<(), StoreError> {
        self.kv.set(MEDIA_KEY, &serde_json::to_string(records)?)?;
        let mut sorted = records.to_vec();
        sort_media(&mut sorted);
        self.media_tx.send_replace(Arc::new(sorted));
        Ok(())
    }

    fn next_row_id() -> String {
        Utc::now().timestamp_millis().to_string()
    }

    /// Re-read both blobs and re-broadcast whichever changed. This is what
    /// the poller calls on its interval to pick up writes made by another
    /// process; consumers see up to one interval of staleness.
    pub fn refresh(&self) -> Result<(), StoreError> {
        let mut students = Self::load_students(&self.kv)?;
        sort_students(&mut students);
        if **self.students_tx.borrow() != students {
            self.students_tx.send_replace(Arc::new(students));
        }

        let mut media = Self::load_media(&self.kv)?;
        sort_media(&mut media);
        if **self.media_tx.borrow() != media {
            self.media_tx.send_replace(Arc::new(media));
        }
        Ok(())
    }
}

#[async_trait]
impl Storage for LocalStore {
    async fn list_students(&self) -> Result<Vec<StudentRecord>, StoreError> {
        let mut records = Self::load_students(&self.kv)?;
        sort_students(&mut records);
        Ok(records)
    }

    async fn upsert_student(
        &self,
        input: StudentInput,
        row_id: Option<String>,
    ) -> Result<StudentRecord, StoreError> {
        validate_student(&input)?;
        let password_hash = hash_password(&input.password)?;

        let _guard = self.write_lock.lock().await;
        let mut records = Self::load_students(&self.kv)?;

        let record = match row_id {
            Some(id) => {
                let slot = records
                    .iter_mut()
                    .find(|s| s.id == id)
                    .ok_or_else(|| StoreError::NotFound(format!("student {id}")))?;
                *slot = StudentRecord {
                    id,
                    student_id: input.student_id,
                    password_hash,
                    name: input.name,
                    roll_number: input.roll_number,
                    class_name: input.class_name,
                    section: input.section,
                    email: input.email,
                    phone: input.phone,
                };
                slot.clone()
            }
            None => {
                let record = StudentRecord {
                    id: Self::next_row_id(),
                    student_id: input.student_id,
                    password_hash,
                    name: input.name,
                    roll_number: input.roll_number,
                    class_name: input.class_name,
                    section: input.section,
                    email: input.email,
                    phone: input.phone,
                };
                records.push(record.clone());
                record
            }
        };

        self.save_students(&records)?;
        Ok(record)
    }

    async fn remove_student(&self, row_id: &str) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut records = Self::load_students(&self.kv)?;
        let before = records.len();
        records.retain(|s| s.id != row_id);
        if records.len() == before {
            return Err(StoreError::NotFound(format!("student {row_id}")));
        }
        self.save_students(&records)?;
        Ok(())
    }

    async fn authenticate(
        &self,
        student_id: &str,
        password: &str,
    ) -> Result<String, StoreError> {
        let records = Self::load_students(&self.kv)?;
        let mut matches = records
            .into_iter()
            .filter(|s| s.student_id == student_id && verify_password(password, &s.password_hash));

        match (matches.next(), matches.next()) {
            (Some(student), None) => Ok(student.name),
            _ => Err(StoreError::InvalidCredentials),
        }
    }

    async fn list_media(&self, owner: Option<&str>) -> Result<Vec<MediaRecord>, StoreError> {
        let mut records = Self::load_media(&self.kv)?;
        sort_media(&mut records);
        Ok(filter_owner(records, owner))
    }

    async fn create_media(
        &self,
        upload: MediaUpload,
        payload: MediaPayload,
    ) -> Result<MediaRecord, StoreError> {
        validate_media(&upload, &payload)?;

        let uploaded_at = Utc::now();
        let kind = MediaKind::from_content_type(&payload.content_type);
        // Whole payload embedded; arbitrarily large files bloat the blob
        let url = format!(
            "data:{};base64,{}",
            payload.content_type,
            BASE64.encode(&payload.bytes)
        );

        let record = MediaRecord {
            id: Self::next_row_id(),
            title: upload.title,
            description: upload.description,
            url,
            kind,
            student_id: upload.student_id,
            uploaded_at,
            file_name: payload.file_name,
        };

        let _guard = self.write_lock.lock().await;
        let mut records = Self::load_media(&self.kv)?;
        records.insert(0, record.clone());
        self.save_media(&records)?;
        Ok(record)
    }

    async fn remove_media(&self, row_id: &str) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut records = Self::load_media(&self.kv)?;
        let before = records.len();
        records.retain(|m| m.id != row_id);
        if records.len() == before {
            return Err(StoreError::NotFound(format!("media {row_id}")));
        }
        self.save_media(&records)?;
        Ok(())
    }

    fn subscribe_students(&self) -> watch::Receiver<Arc<Vec<StudentRecord>>> {
        self.students_tx.subscribe()
    }

    fn subscribe_media(&self) -> watch::Receiver<Arc<Vec<MediaRecord>>> {
        self.media_tx.subscribe()
    }
}
