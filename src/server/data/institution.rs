use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::model::{
    institution::{CreateInstitutionParams, Institution, UpdateInstitutionParams},
    pagination::Pagination,
};

pub struct InstitutionRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> InstitutionRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, params: CreateInstitutionParams) -> Result<Institution, DbErr> {
        let now = Utc::now();
        let entity = entity::institution::ActiveModel {
            name: ActiveValue::Set(params.name),
            code: ActiveValue::Set(params.code),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Institution::from_entity(entity))
    }

    pub async fn exists(&self, id: i32) -> Result<bool, DbErr> {
        Ok(entity::prelude::Institution::find_by_id(id)
            .one(self.db)
            .await?
            .is_some())
    }

    /// Checks whether another institution already uses `code`.
    pub async fn code_taken(&self, code: &str, exclude_id: Option<i32>) -> Result<bool, DbErr> {
        let mut query =
            entity::prelude::Institution::find().filter(entity::institution::Column::Code.eq(code));
        if let Some(id) = exclude_id {
            query = query.filter(entity::institution::Column::Id.ne(id));
        }

        Ok(query.count(self.db).await? > 0)
    }

    pub async fn get_paginated(
        &self,
        pagination: Pagination,
    ) -> Result<(Vec<Institution>, u64), DbErr> {
        let paginator = entity::prelude::Institution::find()
            .order_by_asc(entity::institution::Column::Name)
            .paginate(self.db, pagination.per_page);
        let total = paginator.num_items().await?;
        let institutions = paginator
            .fetch_page(pagination.index())
            .await?
            .into_iter()
            .map(Institution::from_entity)
            .collect();

        Ok((institutions, total))
    }

    pub async fn update(
        &self,
        id: i32,
        params: UpdateInstitutionParams,
    ) -> Result<Option<Institution>, DbErr> {
        let Some(model) = entity::prelude::Institution::find_by_id(id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active: entity::institution::ActiveModel = model.into();
        if let Some(name) = params.name {
            active.name = ActiveValue::Set(name);
        }
        if let Some(code) = params.code {
            // An empty code clears it
            let code = Some(code).filter(|c| !c.trim().is_empty());
            active.code = ActiveValue::Set(code);
        }
        active.updated_at = ActiveValue::Set(Utc::now());

        Ok(Some(Institution::from_entity(active.update(self.db).await?)))
    }

    pub async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::Institution::delete_by_id(id)
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
