use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "media")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub title: String,
    pub description: String,
    #[sea_orm(column_type = "Text")]
    pub url: String,
    pub kind: String,
    // Owner reference by string equality only; no foreign key
    pub student_id: String,
    pub uploaded_at: DateTimeUtc,
    pub file_name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::models::MediaRecord {
    fn from(m: Model) -> Self {
        Self {
            id: m.id,
            title: m.title,
            description: m.description,
            url: m.url,
            kind: m.kind.parse().unwrap_or(crate::models::MediaKind::Photo),
            student_id: m.student_id,
            uploaded_at: m.uploaded_at,
            file_name: m.file_name,
        }
    }
}
