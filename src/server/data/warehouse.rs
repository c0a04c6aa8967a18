use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::model::{
    pagination::Pagination,
    warehouse::{CreateWarehouseParams, UpdateWarehouseParams, Warehouse},
};

pub struct WarehouseRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> WarehouseRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, params: CreateWarehouseParams) -> Result<Warehouse, DbErr> {
        let now = Utc::now();
        let entity = entity::warehouse::ActiveModel {
            code: ActiveValue::Set(params.code),
            name: ActiveValue::Set(params.name),
            location: ActiveValue::Set(params.location),
            is_active: ActiveValue::Set(params.is_active),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            deleted_at: ActiveValue::Set(None),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Warehouse::from_entity(entity))
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Warehouse>, DbErr> {
        let entity = entity::prelude::Warehouse::find_by_id(id)
            .filter(entity::warehouse::Column::DeletedAt.is_null())
            .one(self.db)
            .await?;

        Ok(entity.map(Warehouse::from_entity))
    }

    /// Checks whether any warehouse, deleted ones included, uses `code`.
    ///
    /// Deleted rows keep their code, so the unique index still covers them.
    pub async fn code_taken(&self, code: &str, exclude_id: Option<i32>) -> Result<bool, DbErr> {
        let mut query =
            entity::prelude::Warehouse::find().filter(entity::warehouse::Column::Code.eq(code));
        if let Some(id) = exclude_id {
            query = query.filter(entity::warehouse::Column::Id.ne(id));
        }

        Ok(query.count(self.db).await? > 0)
    }

    pub async fn get_paginated(
        &self,
        is_active: Option<bool>,
        pagination: Pagination,
    ) -> Result<(Vec<Warehouse>, u64), DbErr> {
        let mut query = entity::prelude::Warehouse::find()
            .filter(entity::warehouse::Column::DeletedAt.is_null())
            .order_by_asc(entity::warehouse::Column::Code);

        if let Some(is_active) = is_active {
            query = query.filter(entity::warehouse::Column::IsActive.eq(is_active));
        }

        let paginator = query.paginate(self.db, pagination.per_page);
        let total = paginator.num_items().await?;
        let warehouses = paginator
            .fetch_page(pagination.index())
            .await?
            .into_iter()
            .map(Warehouse::from_entity)
            .collect();

        Ok((warehouses, total))
    }

    pub async fn update(
        &self,
        id: i32,
        params: UpdateWarehouseParams,
    ) -> Result<Option<Warehouse>, DbErr> {
        let Some(model) = entity::prelude::Warehouse::find_by_id(id)
            .filter(entity::warehouse::Column::DeletedAt.is_null())
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active: entity::warehouse::ActiveModel = model.into();
        if let Some(code) = params.code {
            active.code = ActiveValue::Set(code);
        }
        if let Some(name) = params.name {
            active.name = ActiveValue::Set(name);
        }
        if let Some(location) = params.location {
            active.location = ActiveValue::Set(Some(location));
        }
        if let Some(is_active) = params.is_active {
            active.is_active = ActiveValue::Set(is_active);
        }
        active.updated_at = ActiveValue::Set(Utc::now());

        Ok(Some(Warehouse::from_entity(active.update(self.db).await?)))
    }

    pub async fn soft_delete(&self, id: i32) -> Result<bool, DbErr> {
        let now = Utc::now();
        let result = entity::prelude::Warehouse::update_many()
            .col_expr(
                entity::warehouse::Column::DeletedAt,
                sea_orm::sea_query::Expr::value(now),
            )
            .filter(entity::warehouse::Column::Id.eq(id))
            .filter(entity::warehouse::Column::DeletedAt.is_null())
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    pub async fn count(&self) -> Result<u64, DbErr> {
        entity::prelude::Warehouse::find()
            .filter(entity::warehouse::Column::DeletedAt.is_null())
            .count(self.db)
            .await
    }
}
