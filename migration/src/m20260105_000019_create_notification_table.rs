use sea_orm_migration::{prelude::*, schema::*};

use super::m20260105_000001_create_user_table::User;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Notification::Table)
                    .if_not_exists()
                    .col(pk_auto(Notification::Id))
                    .col(integer(Notification::UserId))
                    .col(string(Notification::Title))
                    .col(text(Notification::Message))
                    .col(string_len(Notification::Kind, 16))
                    .col(string_len(Notification::Category, 24))
                    .col(string_null(Notification::ReferenceType))
                    .col(integer_null(Notification::ReferenceId))
                    .col(boolean(Notification::IsRead).default(false))
                    .col(timestamp_with_time_zone_null(Notification::ReadAt))
                    .col(
                        timestamp_with_time_zone(Notification::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(
                        timestamp_with_time_zone(Notification::UpdatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_notifications_user_id")
                            .from(Notification::Table, Notification::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Notification::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Notification {
    #[sea_orm(iden = "notifications")]
    Table,
    Id,
    UserId,
    Title,
    Message,
    Kind,
    Category,
    ReferenceType,
    ReferenceId,
    IsRead,
    ReadAt,
    CreatedAt,
    UpdatedAt,
}
