use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::model::{pagination::Pagination, uom::Uom};

pub struct UomRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UomRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, name: String, symbol: String) -> Result<Uom, DbErr> {
        let now = Utc::now();
        let entity = entity::uom::ActiveModel {
            name: ActiveValue::Set(name),
            symbol: ActiveValue::Set(symbol),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Uom::from_entity(entity))
    }

    pub async fn exists(&self, id: i32) -> Result<bool, DbErr> {
        Ok(entity::prelude::Uom::find_by_id(id)
            .one(self.db)
            .await?
            .is_some())
    }

    pub async fn symbol_exists(&self, symbol: &str) -> Result<bool, DbErr> {
        let count = entity::prelude::Uom::find()
            .filter(entity::uom::Column::Symbol.eq(symbol))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    pub async fn get_paginated(&self, pagination: Pagination) -> Result<(Vec<Uom>, u64), DbErr> {
        let paginator = entity::prelude::Uom::find()
            .order_by_asc(entity::uom::Column::Name)
            .paginate(self.db, pagination.per_page);
        let total = paginator.num_items().await?;
        let uoms = paginator
            .fetch_page(pagination.index())
            .await?
            .into_iter()
            .map(Uom::from_entity)
            .collect();

        Ok((uoms, total))
    }
}
