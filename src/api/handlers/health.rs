use crate::AppState;
use axum::{Json, extract::State};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub mode: String,
    pub store: String,
    pub version: String,
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "System health status", body = HealthResponse)
    ),
    tag = "system"
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let store_status = if state.store.list_students().await.is_ok() {
        "connected"
    } else {
        "disconnected"
    };

    Json(HealthResponse {
        status: "ok".to_string(),
        mode: state.mode.as_str().to_string(),
        store: store_status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
