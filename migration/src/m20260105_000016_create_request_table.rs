use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20260105_000010_create_material_table::Material,
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
                    .table(Request::Table)
                    .if_not_exists()
                    .col(pk_auto(Request::Id))
                    .col(integer(Request::RequestedBy))
                    .col(integer(Request::MaterialId))
                    .col(integer(Request::ProjectId))
                    .col(double(Request::RequestedQty))
                    .col(double_null(Request::RevisedQty))
                    .col(string_len(Request::Status, 16))
                    .col(text_null(Request::RequestNote))
                    .col(
                        timestamp_with_time_zone(Request::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(
                        timestamp_with_time_zone(Request::UpdatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_requests_requested_by")
                            .from(Request::Table, Request::RequestedBy)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_requests_material_id")
                            .from(Request::Table, Request::MaterialId)
                            .to(Material::Table, Material::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_requests_project_id")
                            .from(Request::Table, Request::ProjectId)
                            .to(Project::Table, Project::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Request::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Request {
    #[sea_orm(iden = "requests")]
    Table,
    Id,
    RequestedBy,
    MaterialId,
    ProjectId,
    RequestedQty,
    RevisedQty,
    Status,
    RequestNote,
    CreatedAt,
    UpdatedAt,
}
