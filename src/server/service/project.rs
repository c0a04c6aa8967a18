//! Projects and their user and employee memberships.

use sea_orm::DatabaseConnection;

use crate::server::{
    data::{
        employee::EmployeeRepository,
        project::{ProjectEmployeeRepository, ProjectRepository, ProjectUserRepository},
        user::UserRepository,
    },
    error::AppError,
    model::{
        pagination::{Paginated, Pagination},
        project::{
            CreateProjectParams, Project, ProjectAssignment, ProjectMember, UpdateProjectParams,
        },
    },
    util::validation::Validator,
};
use entity::enums::UserRole;

pub struct ProjectService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ProjectService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get_paginated(
        &self,
        pagination: Pagination,
    ) -> Result<Paginated<Project>, AppError> {
        let (projects, total) = ProjectRepository::new(self.db)
            .get_paginated(pagination)
            .await?;

        Ok(Paginated::new(projects, total, pagination))
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Project, AppError> {
        ProjectRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Project not found".to_string()))
    }

    pub async fn create(&self, params: CreateProjectParams) -> Result<Project, AppError> {
        validate_dates(&params.name, params.start_date, params.end_date)?;

        Ok(ProjectRepository::new(self.db).create(params).await?)
    }

    pub async fn update(&self, id: i32, params: UpdateProjectParams) -> Result<Project, AppError> {
        if let Some(name) = &params.name {
            Validator::new().not_blank(name, "name").finish()?;
        }

        ProjectRepository::new(self.db)
            .update(id, params)
            .await?
            .ok_or_else(|| AppError::NotFound("Project not found".to_string()))
    }

    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        if !ProjectRepository::new(self.db).soft_delete(id).await? {
            return Err(AppError::NotFound("Project not found".to_string()));
        }

        Ok(())
    }

    pub async fn get_users(&self, project_id: i32) -> Result<Vec<ProjectMember>, AppError> {
        self.ensure_project(project_id).await?;

        Ok(ProjectUserRepository::new(self.db)
            .get_by_project(project_id)
            .await?)
    }

    /// Adds a user to a project.
    ///
    /// # Returns
    /// - `Ok(ProjectMember)` - The new membership
    /// - `Err(AppError::NotFound)` - Project or user does not exist
    /// - `Err(AppError::BadRequest)` - User is already a member
    pub async fn add_user(
        &self,
        project_id: i32,
        user_id: i32,
        role: UserRole,
    ) -> Result<ProjectMember, AppError> {
        self.ensure_project(project_id).await?;
        if UserRepository::new(self.db).find_by_id(user_id).await?.is_none() {
            return Err(AppError::NotFound("User not found".to_string()));
        }

        let repo = ProjectUserRepository::new(self.db);
        if repo.exists(project_id, user_id).await? {
            return Err(AppError::BadRequest(
                "User is already assigned to this project".to_string(),
            ));
        }

        Ok(repo.add(project_id, user_id, role).await?)
    }

    pub async fn remove_user(&self, project_id: i32, user_id: i32) -> Result<(), AppError> {
        if !ProjectUserRepository::new(self.db)
            .remove(project_id, user_id)
            .await?
        {
            return Err(AppError::NotFound(
                "User is not assigned to this project".to_string(),
            ));
        }

        Ok(())
    }

    pub async fn get_employees(
        &self,
        project_id: i32,
    ) -> Result<Vec<ProjectAssignment>, AppError> {
        self.ensure_project(project_id).await?;

        Ok(ProjectEmployeeRepository::new(self.db)
            .get_by_project(project_id)
            .await?)
    }

    pub async fn add_employee(
        &self,
        project_id: i32,
        employee_id: i32,
        role: Option<String>,
    ) -> Result<ProjectAssignment, AppError> {
        self.ensure_project(project_id).await?;
        if EmployeeRepository::new(self.db)
            .find_by_id(employee_id)
            .await?
            .is_none()
        {
            return Err(AppError::NotFound("Employee not found".to_string()));
        }

        let repo = ProjectEmployeeRepository::new(self.db);
        if repo.exists(project_id, employee_id).await? {
            return Err(AppError::BadRequest(
                "Employee is already assigned to this project".to_string(),
            ));
        }

        Ok(repo.add(project_id, employee_id, role).await?)
    }

    pub async fn remove_employee(&self, project_id: i32, employee_id: i32) -> Result<(), AppError> {
        if !ProjectEmployeeRepository::new(self.db)
            .remove(project_id, employee_id)
            .await?
        {
            return Err(AppError::NotFound(
                "Employee is not assigned to this project".to_string(),
            ));
        }

        Ok(())
    }

    async fn ensure_project(&self, id: i32) -> Result<(), AppError> {
        if !ProjectRepository::new(self.db).exists(id).await? {
            return Err(AppError::NotFound("Project not found".to_string()));
        }

        Ok(())
    }
}

fn validate_dates(
    name: &str,
    start: Option<chrono::DateTime<chrono::Utc>>,
    end: Option<chrono::DateTime<chrono::Utc>>,
) -> Result<(), AppError> {
    let ordered = match (start, end) {
        (Some(start), Some(end)) => start <= end,
        _ => true,
    };

    Validator::new()
        .not_blank(name, "name")
        .check(ordered, "end_date", "end_date must not be before start_date")
        .finish()
}
