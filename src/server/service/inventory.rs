//! Inventory records, items, reserves and the item audit trail.
//!
//! Quantity changes on items go through a compare-and-swap on the stored value inside
//! a transaction. When the row changed underneath, the caller gets a conflict instead
//! of a silently lost update.

use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::server::{
    data::{
        institution::InstitutionRepository,
        inventory::{
            InventoryItemRepository, InventoryRepository, InventoryReserveRepository,
            InventoryTransactionRepository,
        },
        material::MaterialRepository,
        project::ProjectRepository,
        warehouse::WarehouseRepository,
    },
    error::AppError,
    model::{
        inventory::{
            CreateInventoryItemParams, CreateInventoryParams, CreateReserveParams, Inventory,
            InventoryItem, InventoryReserve, InventoryTransaction, InventoryTransactionFilter,
            ItemLevels, QuantityAdjustment, RecordTransactionParams, ACTION_QTY_UPDATE,
            ACTION_RESERVE_COMPLETE,
        },
        pagination::{Paginated, Pagination},
    },
    util::validation::Validator,
};
use entity::enums::ReserveStatus;

const ITEM_CONFLICT: &str = "Inventory item was modified concurrently";

pub struct InventoryService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> InventoryService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get_paginated(
        &self,
        pagination: Pagination,
    ) -> Result<Paginated<Inventory>, AppError> {
        let (inventories, total) = InventoryRepository::new(self.db)
            .get_paginated(pagination)
            .await?;

        Ok(Paginated::new(inventories, total, pagination))
    }

    pub async fn create(&self, params: CreateInventoryParams) -> Result<Inventory, AppError> {
        Validator::new()
            .non_negative(params.quantity, "quantity")
            .finish()?;
        ensure_material_and_warehouse(self.db, params.material_id, params.warehouse_id).await?;

        Ok(InventoryRepository::new(self.db).create(params).await?)
    }
}

pub struct InventoryItemService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> InventoryItemService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get_paginated(
        &self,
        search: Option<&str>,
        pagination: Pagination,
    ) -> Result<Paginated<InventoryItem>, AppError> {
        let (items, total) = InventoryItemRepository::new(self.db)
            .get_paginated(search, pagination)
            .await?;

        Ok(Paginated::new(items, total, pagination))
    }

    pub async fn get_by_id(&self, id: i32) -> Result<InventoryItem, AppError> {
        InventoryItemRepository::new(self.db)
            .find_with_relations(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Inventory item not found".to_string()))
    }

    /// Creates an item. The unit of measure is taken from the material.
    pub async fn create(&self, params: CreateInventoryItemParams) -> Result<InventoryItem, AppError> {
        Validator::new()
            .non_negative(params.quantity, "quantity")
            .non_negative(params.reserved_quantity, "reserved_quantity")
            .check(
                params.reserved_quantity <= params.quantity,
                "reserved_quantity",
                "reserved_quantity cannot exceed quantity",
            )
            .finish()?;

        let uom_id =
            ensure_material_and_warehouse(self.db, params.material_id, params.warehouse_id)
                .await?;
        if let Some(institution_id) = params.institution_id {
            if !InstitutionRepository::new(self.db)
                .exists(institution_id)
                .await?
            {
                return Err(AppError::NotFound("Institution not found".to_string()));
            }
        }

        let repo = InventoryItemRepository::new(self.db);
        let item = repo.create(params, uom_id).await?;

        repo.find_with_relations(item.id)
            .await?
            .ok_or_else(|| AppError::NotFound("Inventory item not found".to_string()))
    }

    /// Adjusts an item's quantity and writes an audit transaction.
    ///
    /// # Arguments
    /// - `user_id` - User making the change, recorded on the audit row
    /// - `id` - Inventory item id
    /// - `adjustment` - Amount and whether it increases, decreases or replaces the quantity
    ///
    /// # Returns
    /// - `Ok(InventoryItem)` - The item with its new quantity; unchanged when the adjustment
    ///   leaves the quantity as it was
    /// - `Err(AppError::NotFound)` - Item does not exist
    /// - `Err(AppError::BadRequest)` - Resulting quantity is negative or not finite
    /// - `Err(AppError::Conflict)` - The quantity changed between read and write
    pub async fn update_quantity(
        &self,
        user_id: i32,
        id: i32,
        adjustment: QuantityAdjustment,
    ) -> Result<InventoryItem, AppError> {
        let txn = self.db.begin().await?;
        let items = InventoryItemRepository::new(&txn);

        let item = items
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Inventory item not found".to_string()))?;

        let new_quantity = adjustment.apply(item.quantity);
        if !adjustment.quantity.is_finite() || !new_quantity.is_finite() || new_quantity < 0.0 {
            return Err(AppError::BadRequest("Invalid quantity".to_string()));
        }

        if new_quantity == item.quantity {
            let item = items
                .find_with_relations(id)
                .await?
                .ok_or_else(|| AppError::NotFound("Inventory item not found".to_string()))?;
            txn.commit().await?;
            return Ok(item);
        }

        if items
            .set_quantity_if_unchanged(id, item.quantity, new_quantity)
            .await?
            == 0
        {
            tracing::debug!("Lost update on inventory item {}", id);
            return Err(AppError::Conflict(ITEM_CONFLICT.to_string()));
        }

        InventoryTransactionRepository::new(&txn)
            .record(RecordTransactionParams {
                user_id,
                inventory_item_id: item.id,
                material_id: item.material_id,
                warehouse_id: item.warehouse_id,
                uom_id: item.uom_id,
                action: ACTION_QTY_UPDATE.to_string(),
                before_quantity: item.quantity,
                after_quantity: new_quantity,
                note: adjustment.note,
            })
            .await?;

        let updated = items
            .find_with_relations(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Inventory item not found".to_string()))?;

        txn.commit().await?;

        tracing::info!(
            "User {} changed inventory item {} quantity {} -> {}",
            user_id,
            id,
            item.quantity,
            new_quantity
        );

        Ok(updated)
    }

    /// Returns an item's audit trail, newest first.
    pub async fn get_transactions(
        &self,
        id: i32,
        pagination: Pagination,
    ) -> Result<Paginated<InventoryTransaction>, AppError> {
        if InventoryItemRepository::new(self.db)
            .find_by_id(id)
            .await?
            .is_none()
        {
            return Err(AppError::NotFound("Inventory item not found".to_string()));
        }

        let filter = InventoryTransactionFilter {
            inventory_item_id: Some(id),
            ..Default::default()
        };

        InventoryTransactionService::new(self.db)
            .get_paginated(&filter, pagination)
            .await
    }
}

pub struct InventoryReserveService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> InventoryReserveService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get_paginated(
        &self,
        status: Option<ReserveStatus>,
        pagination: Pagination,
    ) -> Result<Paginated<InventoryReserve>, AppError> {
        let (reserves, total) = InventoryReserveRepository::new(self.db)
            .get_paginated(status, pagination)
            .await?;

        Ok(Paginated::new(reserves, total, pagination))
    }

    /// Earmarks part of an item's free quantity.
    ///
    /// # Returns
    /// - `Ok(InventoryReserve)` - The active reserve
    /// - `Err(AppError::Validation)` - Quantity not above zero
    /// - `Err(AppError::NotFound)` - Item or project does not exist
    /// - `Err(AppError::BadRequest)` - Not enough free quantity
    /// - `Err(AppError::Conflict)` - Item levels changed while reserving
    pub async fn create(&self, params: CreateReserveParams) -> Result<InventoryReserve, AppError> {
        Validator::new()
            .positive(params.quantity, "quantity")
            .finish()?;

        if let Some(project_id) = params.project_id {
            if !ProjectRepository::new(self.db).exists(project_id).await? {
                return Err(AppError::NotFound("Project not found".to_string()));
            }
        }

        let txn = self.db.begin().await?;
        let items = InventoryItemRepository::new(&txn);

        let item = items
            .find_by_id(params.inventory_item_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Inventory item not found".to_string()))?;

        if item.available_quantity() < params.quantity {
            return Err(AppError::BadRequest(
                "Insufficient available quantity".to_string(),
            ));
        }

        let before = item.levels();
        let after = ItemLevels {
            reserved_quantity: before.reserved_quantity + params.quantity,
            ..before
        };
        if items.set_levels_if_unchanged(item.id, before, after).await? == 0 {
            return Err(AppError::Conflict(ITEM_CONFLICT.to_string()));
        }

        let reserve = InventoryReserveRepository::new(&txn)
            .create(&item, params)
            .await?;

        txn.commit().await?;

        tracing::info!(
            "Reserved {} of inventory item {} (reserve {})",
            reserve.quantity,
            item.id,
            reserve.id
        );

        Ok(reserve)
    }

    /// Completes or cancels an active reserve.
    ///
    /// Both release the reserved quantity. Completing also consumes it from the item's
    /// quantity and records an outgoing audit transaction.
    pub async fn update_status(
        &self,
        user_id: i32,
        id: i32,
        status: ReserveStatus,
    ) -> Result<InventoryReserve, AppError> {
        if status == ReserveStatus::Active {
            return Err(AppError::BadRequest(
                "Reserves can only be completed or cancelled".to_string(),
            ));
        }

        let txn = self.db.begin().await?;
        let reserves = InventoryReserveRepository::new(&txn);
        let items = InventoryItemRepository::new(&txn);

        let reserve = reserves
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Reserve not found".to_string()))?;
        if reserve.status != ReserveStatus::Active {
            return Err(AppError::BadRequest(
                "Only active reserves can be changed".to_string(),
            ));
        }

        let item = items
            .find_by_id(reserve.inventory_item_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Inventory item not found".to_string()))?;

        let before = item.levels();
        let consumed = if status == ReserveStatus::Completed {
            reserve.quantity
        } else {
            0.0
        };
        let after = ItemLevels {
            quantity: (before.quantity - consumed).max(0.0),
            reserved_quantity: (before.reserved_quantity - reserve.quantity).max(0.0),
        };

        if items.set_levels_if_unchanged(item.id, before, after).await? == 0 {
            return Err(AppError::Conflict(ITEM_CONFLICT.to_string()));
        }
        if reserves.set_status_if_active(id, status).await? == 0 {
            return Err(AppError::Conflict(
                "Reserve was modified concurrently".to_string(),
            ));
        }

        if status == ReserveStatus::Completed {
            InventoryTransactionRepository::new(&txn)
                .record(RecordTransactionParams {
                    user_id,
                    inventory_item_id: item.id,
                    material_id: item.material_id,
                    warehouse_id: item.warehouse_id,
                    uom_id: item.uom_id,
                    action: ACTION_RESERVE_COMPLETE.to_string(),
                    before_quantity: before.quantity,
                    after_quantity: after.quantity,
                    note: Some(format!("Reserve #{} completed", reserve.id)),
                })
                .await?;
        }

        let reserve = reserves
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Reserve not found".to_string()))?;

        txn.commit().await?;

        tracing::info!("Reserve {} marked {:?}", reserve.id, reserve.status);

        Ok(reserve)
    }
}

pub struct InventoryTransactionService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> InventoryTransactionService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get_paginated(
        &self,
        filter: &InventoryTransactionFilter,
        pagination: Pagination,
    ) -> Result<Paginated<InventoryTransaction>, AppError> {
        let (transactions, total) = InventoryTransactionRepository::new(self.db)
            .get_paginated(filter, pagination)
            .await?;

        Ok(Paginated::new(transactions, total, pagination))
    }
}

/// Checks both references and returns the material's unit of measure.
async fn ensure_material_and_warehouse(
    db: &DatabaseConnection,
    material_id: i32,
    warehouse_id: i32,
) -> Result<i32, AppError> {
    let material = MaterialRepository::new(db)
        .find_by_id(material_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Material not found".to_string()))?;

    if WarehouseRepository::new(db)
        .find_by_id(warehouse_id)
        .await?
        .is_none()
    {
        return Err(AppError::NotFound("Warehouse not found".to_string()));
    }

    Ok(material.uom_id)
}
