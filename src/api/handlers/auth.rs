use crate::api::error::AppError;
use crate::services::session::Session;
use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
pub struct StudentLoginRequest {
    pub student_id: String,
    pub password: String,
}

#[derive(Serialize, ToSchema)]
pub struct StudentLoginResponse {
    pub student_id: String,
    pub name: String,
}

#[derive(Deserialize, ToSchema)]
pub struct AdminLoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Serialize, ToSchema)]
pub struct SessionResponse {
    pub student_id: Option<String>,
    pub name: Option<String>,
    pub is_admin: bool,
}

#[utoipa::path(
    post,
    path = "/auth/student/login",
    request_body = StudentLoginRequest,
    responses(
        (status = 200, description = "Login successful", body = StudentLoginResponse),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "auth"
)]
pub async fn student_login(
    State(state): State<crate::AppState>,
    Json(payload): Json<StudentLoginRequest>,
) -> Result<Json<StudentLoginResponse>, AppError> {
    if payload.student_id.is_empty() || payload.password.is_empty() {
        return Err(AppError::BadRequest(
            "Please enter both Student ID and Password".to_string(),
        ));
    }

    let name = state
        .store
        .authenticate(&payload.student_id, &payload.password)
        .await?;

    state.session.login_student(&payload.student_id, &name);

    Ok(Json(StudentLoginResponse {
        student_id: payload.student_id,
        name,
    }))
}

#[utoipa::path(
    post,
    path = "/auth/admin/login",
    request_body = AdminLoginRequest,
    responses(
        (status = 200, description = "Admin session established"),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "auth"
)]
pub async fn admin_login(
    State(state): State<crate::AppState>,
    Json(payload): Json<AdminLoginRequest>,
) -> Result<StatusCode, AppError> {
    if payload.username != state.config.admin_username
        || payload.password != state.config.admin_password
    {
        return Err(AppError::Unauthorized("Invalid credentials".to_string()));
    }

    state.session.login_admin();
    Ok(StatusCode::OK)
}

#[utoipa::path(
    post,
    path = "/auth/logout",
    responses((status = 200, description = "Session cleared")),
    tag = "auth"
)]
pub async fn logout(State(state): State<crate::AppState>) -> StatusCode {
    state.session.logout();
    StatusCode::OK
}

#[utoipa::path(
    get,
    path = "/auth/session",
    responses((status = 200, description = "Current session", body = SessionResponse)),
    tag = "auth"
)]
pub async fn session(State(state): State<crate::AppState>) -> Json<SessionResponse> {
    let response = match state.session.current() {
        Session::Anonymous => SessionResponse {
            student_id: None,
            name: None,
            is_admin: false,
        },
        Session::Student { student_id, name } => SessionResponse {
            student_id: Some(student_id),
            name: Some(name),
            is_admin: false,
        },
        Session::Admin => SessionResponse {
            student_id: None,
            name: None,
            is_admin: true,
        },
    };
    Json(response)
}
