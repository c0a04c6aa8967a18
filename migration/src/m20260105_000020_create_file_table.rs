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
                    .table(File::Table)
                    .if_not_exists()
                    .col(pk_auto(File::Id))
                    .col(string(File::FileName))
                    .col(string(File::OriginalName))
                    .col(string(File::MimeType))
                    .col(big_integer(File::Size))
                    .col(string_uniq(File::Path))
                    .col(string_len(File::Category, 24))
                    .col(text_null(File::Description))
                    .col(json(File::Tags))
                    .col(integer(File::UploadedBy))
                    .col(boolean(File::IsActive).default(true))
                    .col(
                        timestamp_with_time_zone(File::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(
                        timestamp_with_time_zone(File::UpdatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(timestamp_with_time_zone_null(File::DeletedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_files_uploaded_by")
                            .from(File::Table, File::UploadedBy)
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
            .drop_table(Table::drop().table(File::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum File {
    #[sea_orm(iden = "files")]
    Table,
    Id,
    FileName,
    OriginalName,
    MimeType,
    Size,
    Path,
    Category,
    Description,
    Tags,
    UploadedBy,
    IsActive,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}
