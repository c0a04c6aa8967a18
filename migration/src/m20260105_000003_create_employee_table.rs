use sea_orm_migration::{prelude::*, schema::*};

use super::m20260105_000002_create_role_table::Role;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Employee::Table)
                    .if_not_exists()
                    .col(pk_auto(Employee::Id))
                    .col(string(Employee::FirstName))
                    .col(string_null(Employee::LastName))
                    .col(string_null(Employee::Phone))
                    .col(integer(Employee::RoleId))
                    .col(
                        timestamp_with_time_zone(Employee::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(
                        timestamp_with_time_zone(Employee::UpdatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(timestamp_with_time_zone_null(Employee::DeletedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_employees_role_id")
                            .from(Employee::Table, Employee::RoleId)
                            .to(Role::Table, Role::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Employee::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Employee {
    #[sea_orm(iden = "employees")]
    Table,
    Id,
    FirstName,
    LastName,
    Phone,
    RoleId,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}
