use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::model::{
    inventory::{CreateReserveParams, InventoryItem, InventoryReserve},
    pagination::Pagination,
};
use entity::enums::ReserveStatus;

pub struct InventoryReserveRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> InventoryReserveRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts an `active` reserve against an item. Material, warehouse and uom are
    /// taken from the item.
    pub async fn create(
        &self,
        item: &InventoryItem,
        params: CreateReserveParams,
    ) -> Result<InventoryReserve, DbErr> {
        let now = Utc::now();
        let entity = entity::inventory_reserve::ActiveModel {
            material_id: ActiveValue::Set(item.material_id),
            warehouse_id: ActiveValue::Set(item.warehouse_id),
            inventory_item_id: ActiveValue::Set(item.id),
            project_id: ActiveValue::Set(params.project_id),
            uom_id: ActiveValue::Set(item.uom_id),
            quantity: ActiveValue::Set(params.quantity),
            status: ActiveValue::Set(ReserveStatus::Active),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(InventoryReserve::from_entity(entity))
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<InventoryReserve>, DbErr> {
        let entity = entity::prelude::InventoryReserve::find_by_id(id)
            .one(self.db)
            .await?;

        Ok(entity.map(InventoryReserve::from_entity))
    }

    /// Gets a page of reserves, newest first, optionally filtered by status.
    pub async fn get_paginated(
        &self,
        status: Option<ReserveStatus>,
        pagination: Pagination,
    ) -> Result<(Vec<InventoryReserve>, u64), DbErr> {
        let mut query = entity::prelude::InventoryReserve::find()
            .order_by_desc(entity::inventory_reserve::Column::Id);
        if let Some(status) = status {
            query = query.filter(entity::inventory_reserve::Column::Status.eq(status));
        }

        let paginator = query.paginate(self.db, pagination.per_page);
        let total = paginator.num_items().await?;
        let reserves = paginator
            .fetch_page(pagination.index())
            .await?
            .into_iter()
            .map(InventoryReserve::from_entity)
            .collect();

        Ok((reserves, total))
    }

    /// Moves an `active` reserve to `status`.
    ///
    /// # Returns
    /// - `Ok(u64)` - Rows affected. Zero means the reserve is missing or no longer active
    /// - `Err(DbErr)` - Database error during update
    pub async fn set_status_if_active(
        &self,
        id: i32,
        status: ReserveStatus,
    ) -> Result<u64, DbErr> {
        let result = entity::prelude::InventoryReserve::update_many()
            .col_expr(entity::inventory_reserve::Column::Status, Expr::value(status))
            .col_expr(
                entity::inventory_reserve::Column::UpdatedAt,
                Expr::value(Utc::now()),
            )
            .filter(entity::inventory_reserve::Column::Id.eq(id))
            .filter(entity::inventory_reserve::Column::Status.eq(ReserveStatus::Active))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
