use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20260105_000010_create_material_table::Material,
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
                    .table(Inventory::Table)
                    .if_not_exists()
                    .col(pk_auto(Inventory::Id))
                    .col(integer(Inventory::MaterialId))
                    .col(integer(Inventory::WarehouseId))
                    .col(double(Inventory::Quantity).default(0.0))
                    .col(string_null(Inventory::Unit))
                    .col(
                        timestamp_with_time_zone(Inventory::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(
                        timestamp_with_time_zone(Inventory::UpdatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_inventories_material_id")
                            .from(Inventory::Table, Inventory::MaterialId)
                            .to(Material::Table, Material::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_inventories_warehouse_id")
                            .from(Inventory::Table, Inventory::WarehouseId)
                            .to(Warehouse::Table, Warehouse::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Inventory::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Inventory {
    #[sea_orm(iden = "inventories")]
    Table,
    Id,
    MaterialId,
    WarehouseId,
    Quantity,
    Unit,
    CreatedAt,
    UpdatedAt,
}
