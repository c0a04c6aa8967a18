use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20260105_000004_create_project_table::Project,
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
                    .table(ProjectUser::Table)
                    .if_not_exists()
                    .col(pk_auto(ProjectUser::Id))
                    .col(integer(ProjectUser::ProjectId))
                    .col(integer(ProjectUser::UserId))
                    .col(string_len(ProjectUser::Role, 16))
                    .col(
                        timestamp_with_time_zone(ProjectUser::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(
                        timestamp_with_time_zone(ProjectUser::UpdatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_project_users_project_id")
                            .from(ProjectUser::Table, ProjectUser::ProjectId)
                            .to(Project::Table, Project::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_project_users_user_id")
                            .from(ProjectUser::Table, ProjectUser::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_project_users_project_id_user_id")
                    .table(ProjectUser::Table)
                    .col(ProjectUser::ProjectId)
                    .col(ProjectUser::UserId)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ProjectUser::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum ProjectUser {
    #[sea_orm(iden = "project_users")]
    Table,
    Id,
    ProjectId,
    UserId,
    Role,
    CreatedAt,
    UpdatedAt,
}
