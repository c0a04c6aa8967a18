use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20260105_000013_create_inventory_item_table::InventoryItem,
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
                    .table(InventoryTransaction::Table)
                    .if_not_exists()
                    .col(pk_auto(InventoryTransaction::Id))
                    .col(integer(InventoryTransaction::UserId))
                    .col(integer(InventoryTransaction::InventoryItemId))
                    .col(integer(InventoryTransaction::MaterialId))
                    .col(integer(InventoryTransaction::WarehouseId))
                    .col(integer(InventoryTransaction::UomId))
                    .col(string_len(InventoryTransaction::Kind, 8))
                    .col(string(InventoryTransaction::Action))
                    .col(double(InventoryTransaction::Quantity))
                    .col(double(InventoryTransaction::BeforeQuantity))
                    .col(double(InventoryTransaction::AfterQuantity))
                    .col(text_null(InventoryTransaction::Note))
                    .col(
                        timestamp_with_time_zone(InventoryTransaction::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_inventory_transactions_inventory_item_id")
                            .from(InventoryTransaction::Table, InventoryTransaction::InventoryItemId)
                            .to(InventoryItem::Table, InventoryItem::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_inventory_transactions_user_id")
                            .from(InventoryTransaction::Table, InventoryTransaction::UserId)
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
            .drop_table(Table::drop().table(InventoryTransaction::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum InventoryTransaction {
    #[sea_orm(iden = "inventory_transactions")]
    Table,
    Id,
    UserId,
    InventoryItemId,
    MaterialId,
    WarehouseId,
    UomId,
    Kind,
    Action,
    Quantity,
    BeforeQuantity,
    AfterQuantity,
    Note,
    CreatedAt,
}
