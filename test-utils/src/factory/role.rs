//! Role factory.

use crate::factory::helpers::next_id;
use chrono::Utc;
use entity::enums::RoleKind;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

pub struct RoleFactory<'a> {
    db: &'a DatabaseConnection,
    name: String,
    kind: RoleKind,
    is_system: bool,
}

impl<'a> RoleFactory<'a> {
    /// Defaults to a non-system `employee` role named `"Role {id}"`.
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self {
            db,
            name: format!("Role {}", next_id()),
            kind: RoleKind::Employee,
            is_system: false,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn kind(mut self, kind: RoleKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn is_system(mut self, is_system: bool) -> Self {
        self.is_system = is_system;
        self
    }

    pub async fn build(self) -> Result<entity::role::Model, DbErr> {
        let now = Utc::now();
        entity::role::ActiveModel {
            name: ActiveValue::Set(self.name),
            kind: ActiveValue::Set(self.kind),
            is_system: ActiveValue::Set(self.is_system),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            deleted_at: ActiveValue::Set(None),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a non-system employee role.
pub async fn create_role(db: &DatabaseConnection) -> Result<entity::role::Model, DbErr> {
    RoleFactory::new(db).build().await
}
