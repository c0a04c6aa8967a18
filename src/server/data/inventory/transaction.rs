use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::model::{
    inventory::{InventoryTransaction, InventoryTransactionFilter, RecordTransactionParams},
    pagination::Pagination,
};
use entity::enums::MovementKind;

/// Append-only audit log of inventory item quantity changes.
pub struct InventoryTransactionRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> InventoryTransactionRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Appends an audit row.
    ///
    /// The kind is `in` when the quantity grew and `out` otherwise. The recorded quantity
    /// is the absolute difference between before and after.
    ///
    /// # Arguments
    /// - `params` - Item, actor, action name and the before/after quantities
    ///
    /// # Returns
    /// - `Ok(InventoryTransaction)` - The inserted row
    /// - `Err(DbErr)` - Database error during insert
    pub async fn record(
        &self,
        params: RecordTransactionParams,
    ) -> Result<InventoryTransaction, DbErr> {
        let kind = if params.after_quantity > params.before_quantity {
            MovementKind::In
        } else {
            MovementKind::Out
        };

        let entity = entity::inventory_transaction::ActiveModel {
            user_id: ActiveValue::Set(params.user_id),
            inventory_item_id: ActiveValue::Set(params.inventory_item_id),
            material_id: ActiveValue::Set(params.material_id),
            warehouse_id: ActiveValue::Set(params.warehouse_id),
            uom_id: ActiveValue::Set(params.uom_id),
            kind: ActiveValue::Set(kind),
            action: ActiveValue::Set(params.action),
            quantity: ActiveValue::Set((params.after_quantity - params.before_quantity).abs()),
            before_quantity: ActiveValue::Set(params.before_quantity),
            after_quantity: ActiveValue::Set(params.after_quantity),
            note: ActiveValue::Set(params.note),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(InventoryTransaction::from_entity(entity))
    }

    /// Gets a filtered page of transactions, newest first.
    pub async fn get_paginated(
        &self,
        filter: &InventoryTransactionFilter,
        pagination: Pagination,
    ) -> Result<(Vec<InventoryTransaction>, u64), DbErr> {
        let mut query = entity::prelude::InventoryTransaction::find()
            .order_by_desc(entity::inventory_transaction::Column::CreatedAt)
            .order_by_desc(entity::inventory_transaction::Column::Id);

        if let Some(item_id) = filter.inventory_item_id {
            query = query.filter(entity::inventory_transaction::Column::InventoryItemId.eq(item_id));
        }
        if let Some(material_id) = filter.material_id {
            query = query.filter(entity::inventory_transaction::Column::MaterialId.eq(material_id));
        }
        if let Some(warehouse_id) = filter.warehouse_id {
            query =
                query.filter(entity::inventory_transaction::Column::WarehouseId.eq(warehouse_id));
        }
        if let Some(kind) = filter.kind {
            query = query.filter(entity::inventory_transaction::Column::Kind.eq(kind));
        }

        let paginator = query.paginate(self.db, pagination.per_page);
        let total = paginator.num_items().await?;
        let transactions = paginator
            .fetch_page(pagination.index())
            .await?
            .into_iter()
            .map(InventoryTransaction::from_entity)
            .collect();

        Ok((transactions, total))
    }
}
