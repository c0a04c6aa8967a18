//! Inventory, inventory item, reserve and transaction domain models.

use chrono::{DateTime, Utc};

use crate::model::inventory::{
    CreateInventoryDto, CreateInventoryItemDto, InventoryDto, InventoryItemDto,
    InventoryReserveDto, InventoryTransactionDto, MaterialSummaryDto, QuantityOperation,
    UomSummaryDto, WarehouseSummaryDto,
};
use entity::enums::{ItemType, MovementKind, ReserveStatus};

/// Action recorded for a manual quantity adjustment.
pub const ACTION_QTY_UPDATE: &str = "qty_update";
/// Action recorded when a completed reserve is taken out of stock.
pub const ACTION_RESERVE_COMPLETE: &str = "reserve_complete";

#[derive(Debug, Clone, PartialEq)]
pub struct Inventory {
    pub id: i32,
    pub material_id: i32,
    pub warehouse_id: i32,
    pub quantity: f64,
    pub unit: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Inventory {
    pub fn from_entity(entity: entity::inventory::Model) -> Self {
        Self {
            id: entity.id,
            material_id: entity.material_id,
            warehouse_id: entity.warehouse_id,
            quantity: entity.quantity,
            unit: entity.unit,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    pub fn into_dto(self) -> InventoryDto {
        InventoryDto {
            id: self.id,
            material_id: self.material_id,
            warehouse_id: self.warehouse_id,
            quantity: self.quantity,
            unit: self.unit,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateInventoryParams {
    pub material_id: i32,
    pub warehouse_id: i32,
    pub quantity: f64,
    pub unit: Option<String>,
}

impl CreateInventoryParams {
    pub fn from_dto(dto: CreateInventoryDto) -> Self {
        Self {
            material_id: dto.material_id,
            warehouse_id: dto.warehouse_id,
            quantity: dto.quantity,
            unit: dto.unit,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MaterialSummary {
    pub id: i32,
    pub code: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WarehouseSummary {
    pub id: i32,
    pub code: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UomSummary {
    pub id: i32,
    pub symbol: String,
}

/// Stocked quantity of a material at a warehouse, with display summaries of
/// the rows it references when they were loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct InventoryItem {
    pub id: i32,
    pub material_id: i32,
    pub warehouse_id: i32,
    pub uom_id: i32,
    pub institution_id: Option<i32>,
    pub item_type: ItemType,
    pub quantity: f64,
    pub reserved_quantity: f64,
    pub material: Option<MaterialSummary>,
    pub warehouse: Option<WarehouseSummary>,
    pub uom: Option<UomSummary>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl InventoryItem {
    pub fn from_entity(entity: entity::inventory_item::Model) -> Self {
        Self {
            id: entity.id,
            material_id: entity.material_id,
            warehouse_id: entity.warehouse_id,
            uom_id: entity.uom_id,
            institution_id: entity.institution_id,
            item_type: entity.item_type,
            quantity: entity.quantity,
            reserved_quantity: entity.reserved_quantity,
            material: None,
            warehouse: None,
            uom: None,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    /// Converts an entity with the material, warehouse and unit rows it references.
    pub fn from_entity_with_relations(
        entity: entity::inventory_item::Model,
        material: Option<&entity::material::Model>,
        warehouse: Option<&entity::warehouse::Model>,
        uom: Option<&entity::uom::Model>,
    ) -> Self {
        Self {
            material: material.map(|m| MaterialSummary {
                id: m.id,
                code: m.code.clone(),
                name: m.name.clone(),
            }),
            warehouse: warehouse.map(|w| WarehouseSummary {
                id: w.id,
                code: w.code.clone(),
                name: w.name.clone(),
            }),
            uom: uom.map(|u| UomSummary {
                id: u.id,
                symbol: u.symbol.clone(),
            }),
            ..Self::from_entity(entity)
        }
    }

    /// Quantity not held by active reserves.
    pub fn available_quantity(&self) -> f64 {
        self.quantity - self.reserved_quantity
    }

    pub fn levels(&self) -> ItemLevels {
        ItemLevels {
            quantity: self.quantity,
            reserved_quantity: self.reserved_quantity,
        }
    }

    pub fn into_dto(self) -> InventoryItemDto {
        InventoryItemDto {
            id: self.id,
            material_id: self.material_id,
            warehouse_id: self.warehouse_id,
            uom_id: self.uom_id,
            institution_id: self.institution_id,
            item_type: self.item_type,
            quantity: self.quantity,
            reserved_quantity: self.reserved_quantity,
            material: self.material.map(|m| MaterialSummaryDto {
                id: m.id,
                code: m.code,
                name: m.name,
            }),
            warehouse: self.warehouse.map(|w| WarehouseSummaryDto {
                id: w.id,
                code: w.code,
                name: w.name,
            }),
            uom: self.uom.map(|u| UomSummaryDto {
                id: u.id,
                symbol: u.symbol,
            }),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// On-hand and reserved quantity of an inventory item, compared and swapped as a pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemLevels {
    pub quantity: f64,
    pub reserved_quantity: f64,
}

#[derive(Debug, Clone)]
pub struct CreateInventoryItemParams {
    pub material_id: i32,
    pub warehouse_id: i32,
    pub institution_id: Option<i32>,
    pub item_type: ItemType,
    pub quantity: f64,
    pub reserved_quantity: f64,
}

impl CreateInventoryItemParams {
    pub fn from_dto(dto: CreateInventoryItemDto) -> Self {
        Self {
            material_id: dto.material_id,
            warehouse_id: dto.warehouse_id,
            institution_id: dto.institution_id,
            item_type: dto.item_type,
            quantity: dto.quantity,
            reserved_quantity: dto.reserved_quantity,
        }
    }
}

/// A requested change to an item's quantity.
#[derive(Debug, Clone)]
pub struct QuantityAdjustment {
    pub quantity: f64,
    pub operation: QuantityOperation,
    pub note: Option<String>,
}

impl QuantityAdjustment {
    /// Applies the adjustment to the stored quantity.
    pub fn apply(&self, current: f64) -> f64 {
        match self.operation {
            QuantityOperation::Increase => current + self.quantity,
            QuantityOperation::Decrease => current - self.quantity,
            QuantityOperation::Set => self.quantity,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InventoryTransaction {
    pub id: i32,
    pub user_id: i32,
    pub inventory_item_id: i32,
    pub material_id: i32,
    pub warehouse_id: i32,
    pub uom_id: i32,
    pub kind: MovementKind,
    pub action: String,
    pub quantity: f64,
    pub before_quantity: f64,
    pub after_quantity: f64,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl InventoryTransaction {
    pub fn from_entity(entity: entity::inventory_transaction::Model) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            inventory_item_id: entity.inventory_item_id,
            material_id: entity.material_id,
            warehouse_id: entity.warehouse_id,
            uom_id: entity.uom_id,
            kind: entity.kind,
            action: entity.action,
            quantity: entity.quantity,
            before_quantity: entity.before_quantity,
            after_quantity: entity.after_quantity,
            note: entity.note,
            created_at: entity.created_at,
        }
    }

    pub fn into_dto(self) -> InventoryTransactionDto {
        InventoryTransactionDto {
            id: self.id,
            user_id: self.user_id,
            inventory_item_id: self.inventory_item_id,
            material_id: self.material_id,
            warehouse_id: self.warehouse_id,
            uom_id: self.uom_id,
            kind: self.kind,
            action: self.action,
            quantity: self.quantity,
            before_quantity: self.before_quantity,
            after_quantity: self.after_quantity,
            note: self.note,
            created_at: self.created_at,
        }
    }
}

/// Audit entry for a change of an item's quantity from `before` to `after`.
#[derive(Debug, Clone)]
pub struct RecordTransactionParams {
    pub user_id: i32,
    pub inventory_item_id: i32,
    pub material_id: i32,
    pub warehouse_id: i32,
    pub uom_id: i32,
    pub action: String,
    pub before_quantity: f64,
    pub after_quantity: f64,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct InventoryTransactionFilter {
    pub inventory_item_id: Option<i32>,
    pub material_id: Option<i32>,
    pub warehouse_id: Option<i32>,
    pub kind: Option<MovementKind>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InventoryReserve {
    pub id: i32,
    pub material_id: i32,
    pub warehouse_id: i32,
    pub inventory_item_id: i32,
    pub project_id: Option<i32>,
    pub uom_id: i32,
    pub quantity: f64,
    pub status: ReserveStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl InventoryReserve {
    pub fn from_entity(entity: entity::inventory_reserve::Model) -> Self {
        Self {
            id: entity.id,
            material_id: entity.material_id,
            warehouse_id: entity.warehouse_id,
            inventory_item_id: entity.inventory_item_id,
            project_id: entity.project_id,
            uom_id: entity.uom_id,
            quantity: entity.quantity,
            status: entity.status,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    pub fn into_dto(self) -> InventoryReserveDto {
        InventoryReserveDto {
            id: self.id,
            material_id: self.material_id,
            warehouse_id: self.warehouse_id,
            inventory_item_id: self.inventory_item_id,
            project_id: self.project_id,
            uom_id: self.uom_id,
            quantity: self.quantity,
            status: self.status,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateReserveParams {
    pub inventory_item_id: i32,
    pub project_id: Option<i32>,
    pub quantity: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn adjustment(quantity: f64, operation: QuantityOperation) -> QuantityAdjustment {
        QuantityAdjustment {
            quantity,
            operation,
            note: None,
        }
    }

    #[test]
    fn applies_each_operation() {
        assert_eq!(adjustment(3.0, QuantityOperation::Increase).apply(10.0), 13.0);
        assert_eq!(adjustment(3.0, QuantityOperation::Decrease).apply(10.0), 7.0);
        assert_eq!(adjustment(3.0, QuantityOperation::Set).apply(10.0), 3.0);
    }
}
