use crate::api::error::AppError;
use crate::models::{MediaPayload, MediaRecord, MediaUpload};
use crate::services::session::Session;
use axum::{
    Json,
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

#[derive(Deserialize)]
pub struct MediaListQuery {
    pub student_id: Option<String>,
}

#[utoipa::path(
    get,
    path = "/media",
    params(("student_id" = Option<String>, Query, description = "Owner filter (admin only)")),
    responses(
        (status = 200, description = "Media records, newest first", body = [MediaRecord]),
        (status = 401, description = "No session")
    ),
    tag = "media"
)]
pub async fn list_media(
    State(state): State<crate::AppState>,
    Query(query): Query<MediaListQuery>,
) -> Result<Json<Vec<MediaRecord>>, AppError> {
    // Students only ever see their own records; the query filter is an
    // admin affordance
    let owner = match state.session.current() {
        Session::Admin => query.student_id,
        Session::Student { student_id, .. } => Some(student_id),
        Session::Anonymous => {
            return Err(AppError::Unauthorized("Login required".to_string()));
        }
    };

    Ok(Json(state.store.list_media(owner.as_deref()).await?))
}

#[utoipa::path(
    post,
    path = "/media",
    request_body(content = Multipart, description = "title, description, student_id and file parts"),
    responses(
        (status = 201, description = "Media uploaded", body = MediaRecord),
        (status = 400, description = "Missing field or empty payload"),
        (status = 401, description = "Admin session required")
    ),
    tag = "media"
)]
pub async fn upload_media(
    State(state): State<crate::AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<MediaRecord>), AppError> {
    if !state.session.is_admin() {
        return Err(AppError::Unauthorized("Admin session required".to_string()));
    }

    let mut upload = MediaUpload {
        title: String::new(),
        description: String::new(),
        student_id: String::new(),
    };
    let mut payload: Option<MediaPayload> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or_default().to_string();

        match name.as_str() {
            "file" => {
                let file_name = field.file_name().unwrap_or("unnamed").to_string();
                let content_type = field
                    .content_type()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| mime::APPLICATION_OCTET_STREAM.to_string());
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;

                payload = Some(MediaPayload {
                    file_name,
                    content_type,
                    bytes: bytes.to_vec(),
                });
            }
            "title" => upload.title = field.text().await.unwrap_or_default(),
            "description" => upload.description = field.text().await.unwrap_or_default(),
            "student_id" => upload.student_id = field.text().await.unwrap_or_default(),
            _ => {}
        }
    }

    let payload = payload.ok_or_else(|| {
        AppError::BadRequest("Please fill in all fields and select a file".to_string())
    })?;

    let record = state.store.create_media(upload, payload).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

#[utoipa::path(
    delete,
    path = "/media/{id}",
    params(("id" = String, Path, description = "Row identifier")),
    responses(
        (status = 204, description = "Media deleted; blob cleanup is best effort"),
        (status = 401, description = "Admin session required"),
        (status = 404, description = "Unknown row identifier")
    ),
    tag = "media"
)]
pub async fn delete_media(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    if !state.session.is_admin() {
        return Err(AppError::Unauthorized("Admin session required".to_string()));
    }

    state.store.remove_media(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
