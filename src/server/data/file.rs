use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::model::{
    file::{CreateFileParams, StoredFile, UpdateFileParams},
    pagination::Pagination,
};
use entity::enums::FileCategory;

/// Repository for uploaded file metadata. The bytes themselves live on disk.
pub struct FileRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> FileRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, params: CreateFileParams) -> Result<StoredFile, DbErr> {
        let now = Utc::now();
        let entity = entity::file::ActiveModel {
            file_name: ActiveValue::Set(params.file_name),
            original_name: ActiveValue::Set(params.original_name),
            mime_type: ActiveValue::Set(params.mime_type),
            size: ActiveValue::Set(params.size),
            path: ActiveValue::Set(params.path),
            category: ActiveValue::Set(params.category),
            description: ActiveValue::Set(params.description),
            tags: ActiveValue::Set(serde_json::json!(params.tags)),
            uploaded_by: ActiveValue::Set(params.uploaded_by),
            is_active: ActiveValue::Set(true),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            deleted_at: ActiveValue::Set(None),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(StoredFile::from_entity(entity))
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<StoredFile>, DbErr> {
        let entity = entity::prelude::File::find_by_id(id)
            .filter(entity::file::Column::DeletedAt.is_null())
            .one(self.db)
            .await?;

        Ok(entity.map(StoredFile::from_entity))
    }

    /// Gets a page of live files, newest first, optionally limited to one category.
    pub async fn get_paginated(
        &self,
        category: Option<FileCategory>,
        pagination: Pagination,
    ) -> Result<(Vec<StoredFile>, u64), DbErr> {
        let mut query = entity::prelude::File::find()
            .filter(entity::file::Column::DeletedAt.is_null())
            .order_by_desc(entity::file::Column::CreatedAt)
            .order_by_desc(entity::file::Column::Id);
        if let Some(category) = category {
            query = query.filter(entity::file::Column::Category.eq(category));
        }

        let paginator = query.paginate(self.db, pagination.per_page);
        let total = paginator.num_items().await?;
        let files = paginator
            .fetch_page(pagination.index())
            .await?
            .into_iter()
            .map(StoredFile::from_entity)
            .collect();

        Ok((files, total))
    }

    pub async fn update(
        &self,
        id: i32,
        params: UpdateFileParams,
    ) -> Result<Option<StoredFile>, DbErr> {
        let Some(model) = entity::prelude::File::find_by_id(id)
            .filter(entity::file::Column::DeletedAt.is_null())
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active: entity::file::ActiveModel = model.into();
        if let Some(description) = params.description {
            active.description = ActiveValue::Set(Some(description));
        }
        if let Some(tags) = params.tags {
            active.tags = ActiveValue::Set(serde_json::json!(tags));
        }
        if let Some(is_active) = params.is_active {
            active.is_active = ActiveValue::Set(is_active);
        }
        active.updated_at = ActiveValue::Set(Utc::now());

        Ok(Some(StoredFile::from_entity(active.update(self.db).await?)))
    }

    pub async fn soft_delete(&self, id: i32) -> Result<bool, DbErr> {
        let now = Utc::now();
        let result = entity::prelude::File::update_many()
            .col_expr(entity::file::Column::DeletedAt, Expr::value(now))
            .col_expr(entity::file::Column::IsActive, Expr::value(false))
            .filter(entity::file::Column::Id.eq(id))
            .filter(entity::file::Column::DeletedAt.is_null())
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
