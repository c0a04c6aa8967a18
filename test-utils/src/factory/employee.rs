//! Employee factory.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

pub struct EmployeeFactory<'a> {
    db: &'a DatabaseConnection,
    role_id: i32,
    first_name: String,
    last_name: Option<String>,
}

impl<'a> EmployeeFactory<'a> {
    /// Creates a factory for an employee holding `role_id`.
    pub fn new(db: &'a DatabaseConnection, role_id: i32) -> Self {
        Self {
            db,
            role_id,
            first_name: format!("Employee {}", next_id()),
            last_name: None,
        }
    }

    pub fn first_name(mut self, first_name: impl Into<String>) -> Self {
        self.first_name = first_name.into();
        self
    }

    pub fn last_name(mut self, last_name: impl Into<String>) -> Self {
        self.last_name = Some(last_name.into());
        self
    }

    pub async fn build(self) -> Result<entity::employee::Model, DbErr> {
        let now = Utc::now();
        entity::employee::ActiveModel {
            first_name: ActiveValue::Set(self.first_name),
            last_name: ActiveValue::Set(self.last_name),
            phone: ActiveValue::Set(None),
            role_id: ActiveValue::Set(self.role_id),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            deleted_at: ActiveValue::Set(None),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates an employee together with a fresh employee role.
pub async fn create_employee(db: &DatabaseConnection) -> Result<entity::employee::Model, DbErr> {
    let role = crate::factory::role::create_role(db).await?;
    EmployeeFactory::new(db, role.id).build().await
}
