use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Media classification derived from the uploaded payload's declared
/// content type. Anything under `video/*` is a video, everything else a photo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Photo,
    Video,
}

impl MediaKind {
    pub fn from_content_type(content_type: &str) -> Self {
        if content_type.starts_with("video") {
            MediaKind::Video
        } else {
            MediaKind::Photo
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Photo => "photo",
            MediaKind::Video => "video",
        }
    }
}

impl std::str::FromStr for MediaKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "video" => Ok(MediaKind::Video),
            _ => Ok(MediaKind::Photo),
        }
    }
}

/// A registered student. `id` is the storage-assigned row identifier;
/// `student_id` is the business identifier the admin hands out for login.
/// Nothing enforces uniqueness of `student_id` across records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StudentRecord {
    pub id: String,
    pub student_id: String,
    pub password_hash: String,
    pub name: String,
    pub roll_number: String,
    pub class_name: String,
    pub section: String,
    pub email: String,
    pub phone: String,
}

/// Admin-supplied fields for creating or updating a student.
/// The password arrives in clear and is hashed before it is stored.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct StudentInput {
    pub student_id: String,
    pub password: String,
    pub name: String,
    #[serde(default)]
    pub roll_number: String,
    #[serde(default)]
    pub class_name: String,
    #[serde(default)]
    pub section: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
}

/// An uploaded photo or video assigned to one student. `url` is either a
/// blob-store retrieval URL (remote mode) or a self-contained data URI
/// (local mode). Records are never mutated after creation, and `student_id`
/// is a plain string match against [`StudentRecord::student_id`] with no
/// referential check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MediaRecord {
    pub id: String,
    pub title: String,
    pub description: String,
    pub url: String,
    pub kind: MediaKind,
    pub student_id: String,
    pub uploaded_at: DateTime<Utc>,
    pub file_name: String,
}

/// Descriptive fields of a media upload, without the binary payload.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct MediaUpload {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub student_id: String,
}

/// The binary payload of an upload plus its declared identity.
#[derive(Debug, Clone)]
pub struct MediaPayload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_content_type() {
        assert_eq!(MediaKind::from_content_type("video/mp4"), MediaKind::Video);
        assert_eq!(
            MediaKind::from_content_type("video/quicktime"),
            MediaKind::Video
        );
        assert_eq!(MediaKind::from_content_type("image/png"), MediaKind::Photo);
        assert_eq!(MediaKind::from_content_type("image/jpeg"), MediaKind::Photo);
        // Unknown types fall back to photo, matching the upload flow
        assert_eq!(
            MediaKind::from_content_type("application/octet-stream"),
            MediaKind::Photo
        );
    }

    #[test]
    fn test_kind_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&MediaKind::Video).unwrap(),
            "\"video\""
        );
        assert_eq!(
            serde_json::to_string(&MediaKind::Photo).unwrap(),
            "\"photo\""
        );
    }
}
