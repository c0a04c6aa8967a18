use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Warehouse::Table)
                    .if_not_exists()
                    .col(pk_auto(Warehouse::Id))
                    .col(string_uniq(Warehouse::Code))
                    .col(string(Warehouse::Name))
                    .col(text_null(Warehouse::Location))
                    .col(boolean(Warehouse::IsActive).default(true))
                    .col(
                        timestamp_with_time_zone(Warehouse::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(
                        timestamp_with_time_zone(Warehouse::UpdatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(timestamp_with_time_zone_null(Warehouse::DeletedAt))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Warehouse::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Warehouse {
    #[sea_orm(iden = "warehouses")]
    Table,
    Id,
    Code,
    Name,
    Location,
    IsActive,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}
