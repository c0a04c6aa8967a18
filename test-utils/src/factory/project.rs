//! Project factory.

use crate::factory::helpers::next_id;
use chrono::Utc;
use entity::enums::ProjectStatus;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

pub struct ProjectFactory<'a> {
    db: &'a DatabaseConnection,
    name: String,
    status: ProjectStatus,
}

impl<'a> ProjectFactory<'a> {
    /// Defaults to an active project named `"Project {id}"`.
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self {
            db,
            name: format!("Project {}", next_id()),
            status: ProjectStatus::Active,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn status(mut self, status: ProjectStatus) -> Self {
        self.status = status;
        self
    }

    pub async fn build(self) -> Result<entity::project::Model, DbErr> {
        let now = Utc::now();
        entity::project::ActiveModel {
            name: ActiveValue::Set(self.name),
            description: ActiveValue::Set(None),
            status: ActiveValue::Set(self.status),
            start_date: ActiveValue::Set(None),
            end_date: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            deleted_at: ActiveValue::Set(None),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

pub async fn create_project(db: &DatabaseConnection) -> Result<entity::project::Model, DbErr> {
    ProjectFactory::new(db).build().await
}
