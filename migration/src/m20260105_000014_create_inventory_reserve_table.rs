use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20260105_000013_create_inventory_item_table::InventoryItem,
    m20260105_000010_create_material_table::Material,
    m20260105_000004_create_project_table::Project,
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
                    .table(InventoryReserve::Table)
                    .if_not_exists()
                    .col(pk_auto(InventoryReserve::Id))
                    .col(integer(InventoryReserve::MaterialId))
                    .col(integer(InventoryReserve::WarehouseId))
                    .col(integer(InventoryReserve::InventoryItemId))
                    .col(integer_null(InventoryReserve::ProjectId))
                    .col(integer(InventoryReserve::UomId))
                    .col(double(InventoryReserve::Quantity))
                    .col(string_len(InventoryReserve::Status, 16))
                    .col(
                        timestamp_with_time_zone(InventoryReserve::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(
                        timestamp_with_time_zone(InventoryReserve::UpdatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_inventory_reserves_inventory_item_id")
                            .from(InventoryReserve::Table, InventoryReserve::InventoryItemId)
                            .to(InventoryItem::Table, InventoryItem::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_inventory_reserves_material_id")
                            .from(InventoryReserve::Table, InventoryReserve::MaterialId)
                            .to(Material::Table, Material::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_inventory_reserves_warehouse_id")
                            .from(InventoryReserve::Table, InventoryReserve::WarehouseId)
                            .to(Warehouse::Table, Warehouse::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_inventory_reserves_project_id")
                            .from(InventoryReserve::Table, InventoryReserve::ProjectId)
                            .to(Project::Table, Project::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(InventoryReserve::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum InventoryReserve {
    #[sea_orm(iden = "inventory_reserves")]
    Table,
    Id,
    MaterialId,
    WarehouseId,
    InventoryItemId,
    ProjectId,
    UomId,
    Quantity,
    Status,
    CreatedAt,
    UpdatedAt,
}
