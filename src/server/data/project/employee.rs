//! Project assignment repository for site employees.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::model::project::ProjectAssignment;

pub struct ProjectEmployeeRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ProjectEmployeeRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn add(
        &self,
        project_id: i32,
        employee_id: i32,
        role: Option<String>,
    ) -> Result<ProjectAssignment, DbErr> {
        let now = Utc::now();
        let assignment = entity::project_employee::ActiveModel {
            project_id: ActiveValue::Set(project_id),
            employee_id: ActiveValue::Set(employee_id),
            role: ActiveValue::Set(role),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        let employee = entity::prelude::Employee::find_by_id(employee_id)
            .one(self.db)
            .await?
            .ok_or(DbErr::RecordNotFound(format!(
                "Employee {} not found",
                employee_id
            )))?;

        Ok(ProjectAssignment::from_entity(assignment, employee))
    }

    pub async fn exists(&self, project_id: i32, employee_id: i32) -> Result<bool, DbErr> {
        let count = entity::prelude::ProjectEmployee::find()
            .filter(entity::project_employee::Column::ProjectId.eq(project_id))
            .filter(entity::project_employee::Column::EmployeeId.eq(employee_id))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Gets the live employees assigned to a project.
    pub async fn get_by_project(&self, project_id: i32) -> Result<Vec<ProjectAssignment>, DbErr> {
        let rows = entity::prelude::ProjectEmployee::find()
            .filter(entity::project_employee::Column::ProjectId.eq(project_id))
            .order_by_asc(entity::project_employee::Column::Id)
            .find_also_related(entity::prelude::Employee)
            .all(self.db)
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(assignment, employee)| {
                employee
                    .filter(|e| e.deleted_at.is_none())
                    .map(|e| ProjectAssignment::from_entity(assignment, e))
            })
            .collect())
    }

    pub async fn remove(&self, project_id: i32, employee_id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::ProjectEmployee::delete_many()
            .filter(entity::project_employee::Column::ProjectId.eq(project_id))
            .filter(entity::project_employee::Column::EmployeeId.eq(employee_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
