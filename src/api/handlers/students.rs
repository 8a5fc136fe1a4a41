use crate::api::error::AppError;
use crate::models::{StudentInput, StudentRecord};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

#[utoipa::path(
    get,
    path = "/students",
    responses(
        (status = 200, description = "All students, ordered by name", body = [StudentRecord]),
        (status = 401, description = "Admin session required")
    ),
    tag = "students"
)]
pub async fn list_students(
    State(state): State<crate::AppState>,
) -> Result<Json<Vec<StudentRecord>>, AppError> {
    Ok(Json(state.store.list_students().await?))
}

#[utoipa::path(
    post,
    path = "/students",
    request_body = StudentInput,
    responses(
        (status = 201, description = "Student created", body = StudentRecord),
        (status = 400, description = "Missing required field"),
        (status = 401, description = "Admin session required")
    ),
    tag = "students"
)]
pub async fn create_student(
    State(state): State<crate::AppState>,
    Json(input): Json<StudentInput>,
) -> Result<(StatusCode, Json<StudentRecord>), AppError> {
    let record = state.store.upsert_student(input, None).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

#[utoipa::path(
    put,
    path = "/students/{id}",
    params(("id" = String, Path, description = "Row identifier")),
    request_body = StudentInput,
    responses(
        (status = 200, description = "Student updated", body = StudentRecord),
        (status = 400, description = "Missing required field"),
        (status = 404, description = "Unknown row identifier")
    ),
    tag = "students"
)]
pub async fn update_student(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
    Json(input): Json<StudentInput>,
) -> Result<Json<StudentRecord>, AppError> {
    let record = state.store.upsert_student(input, Some(id)).await?;
    Ok(Json(record))
}

#[utoipa::path(
    delete,
    path = "/students/{id}",
    params(("id" = String, Path, description = "Row identifier")),
    responses(
        (status = 204, description = "Student deleted; owned media is left orphaned"),
        (status = 404, description = "Unknown row identifier")
    ),
    tag = "students"
)]
pub async fn delete_student(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.store.remove_student(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
