use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20260105_000010_create_material_table::Material,
    m20260105_000001_create_user_table::User,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(StockMovement::Table)
                    .if_not_exists()
                    .col(pk_auto(StockMovement::Id))
                    .col(integer(StockMovement::MaterialId))
                    .col(integer(StockMovement::UserId))
                    .col(string_len(StockMovement::Kind, 8))
                    .col(double(StockMovement::Quantity))
                    .col(double(StockMovement::PreviousStock))
                    .col(double(StockMovement::NewStock))
                    .col(string_len(StockMovement::ReferenceType, 16))
                    .col(integer_null(StockMovement::ReferenceId))
                    .col(text_null(StockMovement::Notes))
                    .col(
                        timestamp_with_time_zone(StockMovement::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_stock_movements_material_id")
                            .from(StockMovement::Table, StockMovement::MaterialId)
                            .to(Material::Table, Material::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_stock_movements_user_id")
                            .from(StockMovement::Table, StockMovement::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(StockMovement::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum StockMovement {
    #[sea_orm(iden = "stock_movements")]
    Table,
    Id,
    MaterialId,
    UserId,
    Kind,
    Quantity,
    PreviousStock,
    NewStock,
    ReferenceType,
    ReferenceId,
    Notes,
    CreatedAt,
}
