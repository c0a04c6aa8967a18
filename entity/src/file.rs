use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::enums::FileCategory;

/// Metadata of an uploaded document. The bytes live on disk at `path`.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "files")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub file_name: String,
    pub original_name: String,
    pub mime_type: String,
    pub size: i64,
    #[sea_orm(unique)]
    pub path: String,
    pub category: FileCategory,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub tags: Json,
    pub uploaded_by: i32,
    pub is_active: bool,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
    pub deleted_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UploadedBy",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Restrict"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
