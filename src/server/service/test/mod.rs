use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr};

use crate::server::error::AppError;
use test_utils::{builder::TestBuilder, factory};

mod auth;
mod delivery;
mod inventory;
mod material;
mod notification;
mod project;
mod request;
mod role;
mod statistics;
mod user;

/// Turns every update of `column` on `table` into a no-op, so a guarded write sees zero
/// affected rows exactly as if another writer had changed the row after it was read.
async fn ignore_updates_of(
    db: &DatabaseConnection,
    table: &str,
    column: &str,
) -> Result<(), DbErr> {
    db.execute_unprepared(&format!(
        "CREATE TRIGGER ignore_{table}_{column} BEFORE UPDATE OF {column} ON {table} \
         BEGIN SELECT RAISE(IGNORE); END;"
    ))
    .await?;

    Ok(())
}
