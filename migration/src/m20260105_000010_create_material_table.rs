use sea_orm_migration::{prelude::*, schema::*};

use super::m20260105_000007_create_uom_table::Uom;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Material::Table)
                    .if_not_exists()
                    .col(pk_auto(Material::Id))
                    .col(string_uniq(Material::Code))
                    .col(string(Material::Name))
                    .col(string_null(Material::Description))
                    .col(integer(Material::UomId))
                    .col(double(Material::StockQty).default(0.0))
                    .col(double(Material::MinStockQty).default(0.0))
                    .col(
                        timestamp_with_time_zone(Material::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(
                        timestamp_with_time_zone(Material::UpdatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(timestamp_with_time_zone_null(Material::DeletedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_materials_uom_id")
                            .from(Material::Table, Material::UomId)
                            .to(Uom::Table, Uom::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Material::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Material {
    #[sea_orm(iden = "materials")]
    Table,
    Id,
    Code,
    Name,
    Description,
    UomId,
    StockQty,
    MinStockQty,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}
