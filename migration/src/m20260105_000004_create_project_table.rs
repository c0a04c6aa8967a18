use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Project::Table)
                    .if_not_exists()
                    .col(pk_auto(Project::Id))
                    .col(string(Project::Name))
                    .col(text_null(Project::Description))
                    .col(string_len(Project::Status, 16))
                    .col(timestamp_with_time_zone_null(Project::StartDate))
                    .col(timestamp_with_time_zone_null(Project::EndDate))
                    .col(
                        timestamp_with_time_zone(Project::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(
                        timestamp_with_time_zone(Project::UpdatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(timestamp_with_time_zone_null(Project::DeletedAt))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Project::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Project {
    #[sea_orm(iden = "projects")]
    Table,
    Id,
    Name,
    Description,
    Status,
    StartDate,
    EndDate,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}
