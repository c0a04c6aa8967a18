use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::enums::ItemType;

/// A stocked quantity of a material held at a warehouse.
///
/// `reserved_quantity` never exceeds `quantity`; both are non-negative.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "inventory_items")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub material_id: i32,
    pub warehouse_id: i32,
    pub uom_id: i32,
    pub institution_id: Option<i32>,
    pub item_type: ItemType,
    pub quantity: f64,
    pub reserved_quantity: f64,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
    pub deleted_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::material::Entity",
        from = "Column::MaterialId",
        to = "super::material::Column::Id",
        on_update = "Cascade",
        on_delete = "Restrict"
    )]
    Material,
    #[sea_orm(
        belongs_to = "super::warehouse::Entity",
        from = "Column::WarehouseId",
        to = "super::warehouse::Column::Id",
        on_update = "Cascade",
        on_delete = "Restrict"
    )]
    Warehouse,
    #[sea_orm(
        belongs_to = "super::uom::Entity",
        from = "Column::UomId",
        to = "super::uom::Column::Id",
        on_update = "Cascade",
        on_delete = "Restrict"
    )]
    Uom,
    #[sea_orm(
        belongs_to = "super::institution::Entity",
        from = "Column::InstitutionId",
        to = "super::institution::Column::Id",
        on_update = "Cascade",
        on_delete = "SetNull"
    )]
    Institution,
    #[sea_orm(has_many = "super::inventory_transaction::Entity")]
    InventoryTransaction,
    #[sea_orm(has_many = "super::inventory_reserve::Entity")]
    InventoryReserve,
}

impl Related<super::material::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Material.def()
    }
}

impl Related<super::warehouse::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Warehouse.def()
    }
}

impl Related<super::uom::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Uom.def()
    }
}

impl Related<super::institution::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Institution.def()
    }
}

impl Related<super::inventory_transaction::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::InventoryTransaction.def()
    }
}

impl Related<super::inventory_reserve::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::InventoryReserve.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
