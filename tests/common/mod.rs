#![allow(dead_code)]

use anyhow::Result;
use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use class_portal::config::AppConfig;
use class_portal::infrastructure::database::run_migrations;
use class_portal::services::blob::BlobStore;
use class_portal::services::local::LocalStore;
use class_portal::services::remote::RemoteStore;
use class_portal::services::session::SessionCell;
use class_portal::{AppState, StorageMode, create_app};
use http_body_util::BodyExt;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

/// Blob store stub for tests; same seam the remote store uses against S3.
#[derive(Default)]
pub struct MemoryBlobStore {
    objects: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryBlobStore {
    pub fn len(&self) -> usize {
        self.objects.lock().unwrap().len()
    }

    pub fn clear(&self) {
        self.objects.lock().unwrap().clear();
    }

    pub fn contains(&self, key: &str) -> bool {
        self.objects.lock().unwrap().contains_key(key)
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn upload(&self, key: &str, _content_type: &str, data: Vec<u8>) -> Result<String> {
        self.objects.lock().unwrap().insert(key.to_string(), data);
        Ok(format!("memory://{key}"))
    }

    async fn delete(&self, key: &str) -> Result<()> {
        // Missing keys are fine, mirroring S3 delete semantics
        self.objects.lock().unwrap().remove(key);
        Ok(())
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        Ok(self.objects.lock().unwrap().contains_key(key))
    }
}

pub async fn remote_app() -> (Router, AppState, Arc<MemoryBlobStore>) {
    // One pooled connection, or every checkout would see a fresh empty
    // in-memory database
    let mut options = sea_orm::ConnectOptions::new("sqlite::memory:".to_string());
    options.max_connections(1);
    let db = sea_orm::Database::connect(options).await.unwrap();
    run_migrations(&db).await.unwrap();

    let blob = Arc::new(MemoryBlobStore::default());
    let store = RemoteStore::new(db, blob.clone()).await.unwrap();

    let state = AppState {
        store: Arc::new(store),
        session: SessionCell::new(),
        config: AppConfig::default(),
        mode: StorageMode::Remote,
    };

    (create_app(state.clone()), state, blob)
}

pub fn local_app(dir: &std::path::Path) -> (Router, AppState) {
    let store = LocalStore::open(dir).unwrap();

    let state = AppState {
        store: Arc::new(store),
        session: SessionCell::new(),
        config: AppConfig::default(),
        mode: StorageMode::Local,
    };

    (create_app(state.clone()), state)
}

pub async fn send_json(
    app: &Router,
    method: &str,
    uri: &str,
    body: Value,
) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    read_json(response).await
}

pub async fn send(app: &Router, method: &str, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    read_json(response).await
}

async fn read_json(response: axum::response::Response) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

pub async fn login_admin(app: &Router) {
    let (status, _) = send_json(
        app,
        "POST",
        "/auth/admin/login",
        serde_json::json!({"username": "admin", "password": "admin123"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

pub async fn create_student(app: &Router, student_id: &str, password: &str, name: &str) -> Value {
    let (status, body) = send_json(
        app,
        "POST",
        "/students",
        serde_json::json!({
            "student_id": student_id,
            "password": password,
            "name": name,
            "roll_number": "01",
            "class_name": "X",
            "section": "A"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create failed: {body}");
    body
}

const BOUNDARY: &str = "---------------------------123456789012345678901234567";

pub fn multipart_upload(
    title: &str,
    description: &str,
    student_id: &str,
    file_name: &str,
    content_type: &str,
    bytes: &[u8],
) -> (String, Vec<u8>) {
    let mut body = Vec::new();
    for (name, value) in [
        ("title", title),
        ("description", description),
        ("student_id", student_id),
    ] {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    (format!("multipart/form-data; boundary={BOUNDARY}"), body)
}

pub async fn upload_media(
    app: &Router,
    title: &str,
    student_id: &str,
    file_name: &str,
    content_type: &str,
) -> (StatusCode, Value) {
    let (header, body) = multipart_upload(
        title,
        "",
        student_id,
        file_name,
        content_type,
        b"payload-bytes",
    );

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/media")
                .header("Content-Type", header)
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    read_json(response).await
}
