use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20260105_000003_create_employee_table::Employee,
    m20260105_000004_create_project_table::Project,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ProjectEmployee::Table)
                    .if_not_exists()
                    .col(pk_auto(ProjectEmployee::Id))
                    .col(integer(ProjectEmployee::ProjectId))
                    .col(integer(ProjectEmployee::EmployeeId))
                    .col(string_null(ProjectEmployee::Role))
                    .col(
                        timestamp_with_time_zone(ProjectEmployee::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(
                        timestamp_with_time_zone(ProjectEmployee::UpdatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_project_employees_project_id")
                            .from(ProjectEmployee::Table, ProjectEmployee::ProjectId)
                            .to(Project::Table, Project::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_project_employees_employee_id")
                            .from(ProjectEmployee::Table, ProjectEmployee::EmployeeId)
                            .to(Employee::Table, Employee::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_project_employees_project_id_employee_id")
                    .table(ProjectEmployee::Table)
                    .col(ProjectEmployee::ProjectId)
                    .col(ProjectEmployee::EmployeeId)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ProjectEmployee::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum ProjectEmployee {
    #[sea_orm(iden = "project_employees")]
    Table,
    Id,
    ProjectId,
    EmployeeId,
    Role,
    CreatedAt,
    UpdatedAt,
}
