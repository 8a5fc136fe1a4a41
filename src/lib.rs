pub mod api;
pub mod config;
pub mod entities;
pub mod infrastructure;
pub mod models;
pub mod services;
pub mod utils;

use crate::api::handlers;
use crate::api::middleware;
use crate::config::AppConfig;
use crate::services::session::SessionCell;
use crate::services::store::Storage;
use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{delete, get, post, put},
};
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::auth::student_login,
        handlers::auth::admin_login,
        handlers::auth::logout,
        handlers::auth::session,
        handlers::students::list_students,
        handlers::students::create_student,
        handlers::students::update_student,
        handlers::students::delete_student,
        handlers::media::list_media,
        handlers::media::upload_media,
        handlers::media::delete_media,
        handlers::events::student_events,
        handlers::events::media_events,
        handlers::health::health_check,
    ),
    components(
        schemas(
            handlers::auth::StudentLoginRequest,
            handlers::auth::StudentLoginResponse,
            handlers::auth::AdminLoginRequest,
            handlers::auth::SessionResponse,
            handlers::health::HealthResponse,
            models::StudentRecord,
            models::StudentInput,
            models::MediaRecord,
            models::MediaUpload,
            models::MediaKind,
        )
    ),
    tags(
        (name = "auth", description = "Session endpoints"),
        (name = "students", description = "Student registry (admin only)"),
        (name = "media", description = "Media assignment and viewing"),
        (name = "events", description = "Live update streams"),
        (name = "system", description = "Health and diagnostics")
    )
)]
pub struct ApiDoc;

/// Which persistence behavior was selected at startup. Decided exactly
/// once; nothing re-evaluates it afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageMode {
    Remote,
    Local,
}

impl StorageMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageMode::Remote => "remote",
            StorageMode::Local => "local",
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Storage>,
    pub session: SessionCell,
    pub config: AppConfig,
    pub mode: StorageMode,
}

pub fn create_app(state: AppState) -> Router {
    let admin_routes = Router::new()
        .route(
            "/students",
            get(handlers::students::list_students).post(handlers::students::create_student),
        )
        .route(
            "/students/:id",
            put(handlers::students::update_student).delete(handlers::students::delete_student),
        )
        .route("/events/students", get(handlers::events::student_events))
        .route_layer(from_fn_with_state(
            state.clone(),
            middleware::auth::require_admin,
        ));

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/health", get(handlers::health::health_check))
        .route("/auth/student/login", post(handlers::auth::student_login))
        .route("/auth/admin/login", post(handlers::auth::admin_login))
        .route("/auth/logout", post(handlers::auth::logout))
        .route("/auth/session", get(handlers::auth::session))
        .route(
            "/media",
            get(handlers::media::list_media).post(handlers::media::upload_media),
        )
        .route("/media/:id", delete(handlers::media::delete_media))
        .route("/events/media", get(handlers::events::media_events))
        .merge(admin_routes)
        .with_state(state)
}
