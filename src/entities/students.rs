use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "students")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    // Business identifier; deliberately not unique (the admin owns that)
    pub student_id: String,
    pub password_hash: String,
    pub name: String,
    pub roll_number: String,
    pub class_name: String,
    pub section: String,
    pub email: String,
    pub phone: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::models::StudentRecord {
    fn from(m: Model) -> Self {
        Self {
            id: m.id,
            student_id: m.student_id,
            password_hash: m.password_hash,
            name: m.name,
            roll_number: m.roll_number,
            class_name: m.class_name,
            section: m.section,
            email: m.email,
            phone: m.phone,
        }
    }
}
