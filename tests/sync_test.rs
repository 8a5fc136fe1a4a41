mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use class_portal::services::store::Storage;
use common::*;
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn test_remote_subscription_redelivers_full_set() {
    let (app, state, _blob) = remote_app().await;
    login_admin(&app).await;

    let mut rx = state.store.subscribe_students();
    assert!(rx.borrow().is_empty());

    create_student(&app, "STU002", "pw", "Mira").await;
    assert!(rx.has_changed().unwrap());
    assert_eq!(rx.borrow_and_update().len(), 1);

    // Every change re-delivers the whole ordered set, not a delta
    create_student(&app, "STU001", "pw", "Asha").await;
    let snapshot = rx.borrow_and_update().clone();
    assert_eq!(snapshot.len(), 2);
    assert_eq!(snapshot[0].name, "Asha");
    assert_eq!(snapshot[1].name, "Mira");

    // Dropping the receiver is the teardown; later writes must not care
    drop(rx);
    create_student(&app, "STU003", "pw", "Zoya").await;
}

#[tokio::test]
async fn test_media_subscription_tracks_deletes() {
    let (app, state, _blob) = remote_app().await;
    login_admin(&app).await;

    let mut rx = state.store.subscribe_media();
    let (_, record) = upload_media(&app, "Sports Day", "STU001", "a.jpg", "image/jpeg").await;
    assert_eq!(rx.borrow_and_update().len(), 1);

    let row_id = record["id"].as_str().unwrap();
    send(&app, "DELETE", &format!("/media/{row_id}")).await;
    assert!(rx.has_changed().unwrap());
    assert!(rx.borrow_and_update().is_empty());
}

#[tokio::test]
async fn test_event_streams_gate_on_session() {
    let (app, _state, _blob) = remote_app().await;

    let (status, _) = send(&app, "GET", "/events/media").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, "GET", "/events/students").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_event_stream_opens_for_admin() {
    let (app, _state, _blob) = remote_app().await;
    login_admin(&app).await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/events/students")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok()),
        Some("text/event-stream")
    );
}

#[tokio::test]
async fn test_local_mode_scenario_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let (app, _state) = local_app(dir.path());
    login_admin(&app).await;

    create_student(&app, "STU001", "pw1", "Asha").await;

    // The record set persists as one JSON blob under the fixed key
    let blob_path = dir.path().join("classX_students.json");
    assert!(blob_path.exists());

    // A media upload in local mode embeds the payload as a data URI
    let (status, record) = upload_media(&app, "Sports Day", "STU001", "a.jpg", "image/jpeg").await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(record["url"]
        .as_str()
        .unwrap()
        .starts_with("data:image/jpeg;base64,"));

    // A fresh process over the same directory reproduces the state
    let (reopened, _state) = local_app(dir.path());
    login_admin(&reopened).await;

    let (_, students) = send(&reopened, "GET", "/students").await;
    assert_eq!(students.as_array().unwrap().len(), 1);
    assert_eq!(students[0]["student_id"], "STU001");

    let (_, media) = send(&reopened, "GET", "/media?student_id=STU001").await;
    assert_eq!(media.as_array().unwrap().len(), 1);
    assert_eq!(media[0]["title"], "Sports Day");

    // And the student can still log in against the reloaded blob
    send(&reopened, "POST", "/auth/logout").await;
    let (status, body) = send_json(
        &reopened,
        "POST",
        "/auth/student/login",
        json!({"student_id": "STU001", "password": "pw1"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Asha");
}

#[tokio::test]
async fn test_local_poll_picks_up_foreign_writes() {
    let dir = tempfile::tempdir().unwrap();
    let observer = class_portal::services::local::LocalStore::open(dir.path()).unwrap();
    let rx = observer.subscribe_students();

    // An app over the same directory plays the "other tab"
    let (other, _state) = local_app(dir.path());
    login_admin(&other).await;
    create_student(&other, "STU001", "pw1", "Asha").await;

    // Nothing visible until the observer's poll tick runs refresh
    assert!(rx.borrow().is_empty());
    observer.refresh().unwrap();
    assert_eq!(rx.borrow().len(), 1);
    assert_eq!(rx.borrow()[0].student_id, "STU001");
}
