use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20260105_000008_create_institution_table::Institution,
    m20260105_000010_create_material_table::Material,
    m20260105_000007_create_uom_table::Uom,
    m20260105_000009_create_warehouse_table::Warehouse,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(InventoryItem::Table)
                    .if_not_exists()
                    .col(pk_auto(InventoryItem::Id))
                    .col(integer(InventoryItem::MaterialId))
                    .col(integer(InventoryItem::WarehouseId))
                    .col(integer(InventoryItem::UomId))
                    .col(integer_null(InventoryItem::InstitutionId))
                    .col(string_len(InventoryItem::ItemType, 16))
                    .col(double(InventoryItem::Quantity).default(0.0))
                    .col(double(InventoryItem::ReservedQuantity).default(0.0))
                    .col(
                        timestamp_with_time_zone(InventoryItem::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(
                        timestamp_with_time_zone(InventoryItem::UpdatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(timestamp_with_time_zone_null(InventoryItem::DeletedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_inventory_items_material_id")
                            .from(InventoryItem::Table, InventoryItem::MaterialId)
                            .to(Material::Table, Material::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_inventory_items_warehouse_id")
                            .from(InventoryItem::Table, InventoryItem::WarehouseId)
                            .to(Warehouse::Table, Warehouse::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_inventory_items_uom_id")
                            .from(InventoryItem::Table, InventoryItem::UomId)
                            .to(Uom::Table, Uom::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_inventory_items_institution_id")
                            .from(InventoryItem::Table, InventoryItem::InstitutionId)
                            .to(Institution::Table, Institution::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(InventoryItem::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum InventoryItem {
    #[sea_orm(iden = "inventory_items")]
    Table,
    Id,
    MaterialId,
    WarehouseId,
    UomId,
    InstitutionId,
    ItemType,
    Quantity,
    ReservedQuantity,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}
