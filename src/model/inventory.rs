use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use entity::enums::{ItemType, MovementKind, ReserveStatus};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct InventoryDto {
    pub id: i32,
    pub material_id: i32,
    pub warehouse_id: i32,
    pub quantity: f64,
    pub unit: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateInventoryDto {
    pub material_id: i32,
    pub warehouse_id: i32,
    pub quantity: f64,
    pub unit: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MaterialSummaryDto {
    pub id: i32,
    pub code: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct WarehouseSummaryDto {
    pub id: i32,
    pub code: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UomSummaryDto {
    pub id: i32,
    pub symbol: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct InventoryItemDto {
    pub id: i32,
    pub material_id: i32,
    pub warehouse_id: i32,
    pub uom_id: i32,
    pub institution_id: Option<i32>,
    pub item_type: ItemType,
    pub quantity: f64,
    pub reserved_quantity: f64,
    pub material: Option<MaterialSummaryDto>,
    pub warehouse: Option<WarehouseSummaryDto>,
    pub uom: Option<UomSummaryDto>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateInventoryItemDto {
    pub material_id: i32,
    pub warehouse_id: i32,
    pub institution_id: Option<i32>,
    #[serde(default = "default_item_type")]
    pub item_type: ItemType,
    pub quantity: f64,
    #[serde(default)]
    pub reserved_quantity: f64,
}

fn default_item_type() -> ItemType {
    ItemType::Whole
}

/// How a quantity adjustment combines with the stored quantity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum QuantityOperation {
    Increase,
    Decrease,
    #[default]
    Set,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateQuantityDto {
    pub quantity: f64,
    #[serde(default)]
    pub operation: QuantityOperation,
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct InventoryTransactionDto {
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

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct InventoryReserveDto {
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

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateInventoryReserveDto {
    pub inventory_item_id: i32,
    pub project_id: Option<i32>,
    pub quantity: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateReserveStatusDto {
    pub status: ReserveStatus,
}
