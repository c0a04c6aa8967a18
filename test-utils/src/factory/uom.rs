//! Unit of measure factory.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Creates a unit of measure with a unique symbol such as `"u7"`.
pub async fn create_uom(db: &DatabaseConnection) -> Result<entity::uom::Model, DbErr> {
    let id = next_id();
    create_uom_with_symbol(db, format!("Unit {}", id), format!("u{}", id)).await
}

/// Creates a unit of measure with an explicit name and symbol.
pub async fn create_uom_with_symbol(
    db: &DatabaseConnection,
    name: impl Into<String>,
    symbol: impl Into<String>,
) -> Result<entity::uom::Model, DbErr> {
    let now = Utc::now();
    entity::uom::ActiveModel {
        name: ActiveValue::Set(name.into()),
        symbol: ActiveValue::Set(symbol.into()),
        created_at: ActiveValue::Set(now),
        updated_at: ActiveValue::Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
}
