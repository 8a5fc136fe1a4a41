use crate::models::{MediaPayload, MediaUpload, StudentInput};
use crate::services::store::StoreError;

/// Required fields for a student record: business identifier, password and
/// display name. Everything else may stay blank.
pub fn validate_student(input: &StudentInput) -> Result<(), StoreError> {
    if input.student_id.trim().is_empty()
        || input.password.trim().is_empty()
        || input.name.trim().is_empty()
    {
        return Err(StoreError::Validation(
            "Please fill in Student ID, Password, and Name".to_string(),
        ));
    }
    Ok(())
}

/// Required fields for an upload: title, owner identifier and a non-empty
/// payload. The owner is not checked against the student set.
pub fn validate_media(upload: &MediaUpload, payload: &MediaPayload) -> Result<(), StoreError> {
    if upload.title.trim().is_empty()
        || upload.student_id.trim().is_empty()
        || payload.bytes.is_empty()
    {
        return Err(StoreError::Validation(
            "Please fill in all fields and select a file".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> StudentInput {
        StudentInput {
            student_id: "STU001".to_string(),
            password: "pw1".to_string(),
            name: "Asha".to_string(),
            roll_number: String::new(),
            class_name: String::new(),
            section: String::new(),
            email: String::new(),
            phone: String::new(),
        }
    }

    #[test]
    fn test_student_required_fields() {
        assert!(validate_student(&input()).is_ok());

        let mut missing_id = input();
        missing_id.student_id = "  ".to_string();
        assert!(matches!(
            validate_student(&missing_id),
            Err(StoreError::Validation(_))
        ));

        let mut missing_password = input();
        missing_password.password.clear();
        assert!(validate_student(&missing_password).is_err());

        let mut missing_name = input();
        missing_name.name.clear();
        assert!(validate_student(&missing_name).is_err());
    }

    #[test]
    fn test_media_required_fields() {
        let upload = MediaUpload {
            title: "Sports Day".to_string(),
            description: String::new(),
            student_id: "STU001".to_string(),
        };
        let payload = MediaPayload {
            file_name: "a.jpg".to_string(),
            content_type: "image/jpeg".to_string(),
            bytes: vec![1, 2, 3],
        };
        assert!(validate_media(&upload, &payload).is_ok());

        let mut no_title = upload.clone();
        no_title.title.clear();
        assert!(validate_media(&no_title, &payload).is_err());

        let mut no_owner = upload.clone();
        no_owner.student_id.clear();
        assert!(validate_media(&no_owner, &payload).is_err());

        let mut empty = payload.clone();
        empty.bytes.clear();
        assert!(validate_media(&upload, &empty).is_err());
    }
}
