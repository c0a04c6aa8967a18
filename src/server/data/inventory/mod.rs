//! Inventory data repositories.
//!
//! `InventoryRepository` handles the simple per-warehouse inventory ledger. The item,
//! reserve and transaction repositories back the quantity adjustment and reservation
//! flows, and are generic over the connection so they can share one transaction.

pub mod item;
pub mod reserve;
pub mod transaction;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryOrder,
};

use crate::server::model::{
    inventory::{CreateInventoryParams, Inventory},
    pagination::Pagination,
};

pub use item::InventoryItemRepository;
pub use reserve::InventoryReserveRepository;
pub use transaction::InventoryTransactionRepository;

pub struct InventoryRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> InventoryRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, params: CreateInventoryParams) -> Result<Inventory, DbErr> {
        let now = Utc::now();
        let entity = entity::inventory::ActiveModel {
            material_id: ActiveValue::Set(params.material_id),
            warehouse_id: ActiveValue::Set(params.warehouse_id),
            quantity: ActiveValue::Set(params.quantity),
            unit: ActiveValue::Set(params.unit),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Inventory::from_entity(entity))
    }

    /// Gets a page of inventory rows, newest first.
    pub async fn get_paginated(
        &self,
        pagination: Pagination,
    ) -> Result<(Vec<Inventory>, u64), DbErr> {
        let paginator = entity::prelude::Inventory::find()
            .order_by_desc(entity::inventory::Column::CreatedAt)
            .order_by_desc(entity::inventory::Column::Id)
            .paginate(self.db, pagination.per_page);
        let total = paginator.num_items().await?;
        let rows = paginator
            .fetch_page(pagination.index())
            .await?
            .into_iter()
            .map(Inventory::from_entity)
            .collect();

        Ok((rows, total))
    }
}
