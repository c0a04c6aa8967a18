use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "materials")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub uom_id: i32,
    pub stock_qty: f64,
    pub min_stock_qty: f64,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
    pub deleted_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::uom::Entity",
        from = "Column::UomId",
        to = "super::uom::Column::Id",
        on_update = "Cascade",
        on_delete = "Restrict"
    )]
    Uom,
    #[sea_orm(has_many = "super::material_attribute::Entity")]
    MaterialAttribute,
    #[sea_orm(has_many = "super::request::Entity")]
    Request,
    #[sea_orm(has_many = "super::inventory_item::Entity")]
    InventoryItem,
}

impl Related<super::uom::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Uom.def()
    }
}

impl Related<super::material_attribute::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MaterialAttribute.def()
    }
}

impl Related<super::request::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Request.def()
    }
}

impl Related<super::inventory_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::InventoryItem.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
