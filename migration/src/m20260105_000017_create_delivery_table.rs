use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20260105_000016_create_request_table::Request,
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
                    .table(Delivery::Table)
                    .if_not_exists()
                    .col(pk_auto(Delivery::Id))
                    .col(integer_uniq(Delivery::RequestId))
                    .col(integer(Delivery::DeliveredBy))
                    .col(integer_null(Delivery::ReceivedBy))
                    .col(string_len(Delivery::Status, 16))
                    .col(timestamp_with_time_zone_null(Delivery::DeliveryDate))
                    .col(
                        timestamp_with_time_zone(Delivery::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(
                        timestamp_with_time_zone(Delivery::UpdatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_deliveries_request_id")
                            .from(Delivery::Table, Delivery::RequestId)
                            .to(Request::Table, Request::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_deliveries_delivered_by")
                            .from(Delivery::Table, Delivery::DeliveredBy)
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
            .drop_table(Table::drop().table(Delivery::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Delivery {
    #[sea_orm(iden = "deliveries")]
    Table,
    Id,
    RequestId,
    DeliveredBy,
    ReceivedBy,
    Status,
    DeliveryDate,
    CreatedAt,
    UpdatedAt,
}
