use sea_orm_migration::{prelude::*, schema::*};

use super::m20260105_000010_create_material_table::Material;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(MaterialAttribute::Table)
                    .if_not_exists()
                    .col(pk_auto(MaterialAttribute::Id))
                    .col(integer(MaterialAttribute::MaterialId))
                    .col(string(MaterialAttribute::Name))
                    .col(string(MaterialAttribute::Value))
                    .col(
                        timestamp_with_time_zone(MaterialAttribute::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(
                        timestamp_with_time_zone(MaterialAttribute::UpdatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_material_attributes_material_id")
                            .from(MaterialAttribute::Table, MaterialAttribute::MaterialId)
                            .to(Material::Table, Material::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(MaterialAttribute::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum MaterialAttribute {
    #[sea_orm(iden = "material_attributes")]
    Table,
    Id,
    MaterialId,
    Name,
    Value,
    CreatedAt,
    UpdatedAt,
}
