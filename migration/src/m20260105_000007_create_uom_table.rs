use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Uom::Table)
                    .if_not_exists()
                    .col(pk_auto(Uom::Id))
                    .col(string_len(Uom::Name, 50))
                    .col(string_len_uniq(Uom::Symbol, 10))
                    .col(
                        timestamp_with_time_zone(Uom::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(
                        timestamp_with_time_zone(Uom::UpdatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Uom::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Uom {
    #[sea_orm(iden = "uoms")]
    Table,
    Id,
    Name,
    Symbol,
    CreatedAt,
    UpdatedAt,
}
