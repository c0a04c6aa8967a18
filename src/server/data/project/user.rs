//! Project membership repository for user accounts.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::model::project::ProjectMember;
use entity::enums::UserRole;

pub struct ProjectUserRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ProjectUserRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Adds a user to a project.
    ///
    /// # Returns
    /// - `Ok(ProjectMember)` - The new membership with the user's name
    /// - `Err(DbErr)` - Database error, including the unique violation for a repeated
    ///   (project, user) pair
    pub async fn add(
        &self,
        project_id: i32,
        user_id: i32,
        role: UserRole,
    ) -> Result<ProjectMember, DbErr> {
        let now = Utc::now();
        let membership = entity::project_user::ActiveModel {
            project_id: ActiveValue::Set(project_id),
            user_id: ActiveValue::Set(user_id),
            role: ActiveValue::Set(role),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        let user = entity::prelude::User::find_by_id(user_id)
            .one(self.db)
            .await?
            .ok_or(DbErr::RecordNotFound(format!("User {} not found", user_id)))?;

        Ok(ProjectMember::from_entity(membership, user))
    }

    pub async fn exists(&self, project_id: i32, user_id: i32) -> Result<bool, DbErr> {
        let count = entity::prelude::ProjectUser::find()
            .filter(entity::project_user::Column::ProjectId.eq(project_id))
            .filter(entity::project_user::Column::UserId.eq(user_id))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Gets every member of a project ordered by when they joined.
    pub async fn get_by_project(&self, project_id: i32) -> Result<Vec<ProjectMember>, DbErr> {
        let rows = entity::prelude::ProjectUser::find()
            .filter(entity::project_user::Column::ProjectId.eq(project_id))
            .order_by_asc(entity::project_user::Column::Id)
            .find_also_related(entity::prelude::User)
            .all(self.db)
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(membership, user)| {
                user.map(|user| ProjectMember::from_entity(membership, user))
            })
            .collect())
    }

    pub async fn remove(&self, project_id: i32, user_id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::ProjectUser::delete_many()
            .filter(entity::project_user::Column::ProjectId.eq(project_id))
            .filter(entity::project_user::Column::UserId.eq(user_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
