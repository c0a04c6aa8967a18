//! Warehouse factory.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

pub struct WarehouseFactory<'a> {
    db: &'a DatabaseConnection,
    code: String,
    name: String,
    is_active: bool,
}

impl<'a> WarehouseFactory<'a> {
    /// Defaults to an active warehouse with code `"WH-{id}"`.
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            code: format!("WH-{}", id),
            name: format!("Warehouse {}", id),
            is_active: true,
        }
    }

    pub fn code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn is_active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    pub async fn build(self) -> Result<entity::warehouse::Model, DbErr> {
        let now = Utc::now();
        entity::warehouse::ActiveModel {
            code: ActiveValue::Set(self.code),
            name: ActiveValue::Set(self.name),
            location: ActiveValue::Set(None),
            is_active: ActiveValue::Set(self.is_active),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            deleted_at: ActiveValue::Set(None),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

pub async fn create_warehouse(db: &DatabaseConnection) -> Result<entity::warehouse::Model, DbErr> {
    WarehouseFactory::new(db).build().await
}
