//! Project domain models and membership parameters.

use chrono::{DateTime, Utc};

use crate::model::project::{
    CreateProjectDto, ProjectDto, ProjectEmployeeDto, ProjectUserDto, UpdateProjectDto,
};
use entity::enums::{ProjectStatus, UserRole};

/// Project with the number of engineers and contractors assigned to it.
#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub status: ProjectStatus,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub engineer_count: u64,
    pub contractor_count: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Project {
    pub fn from_entity(
        entity: entity::project::Model,
        engineer_count: u64,
        contractor_count: u64,
    ) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            description: entity.description,
            status: entity.status,
            start_date: entity.start_date,
            end_date: entity.end_date,
            engineer_count,
            contractor_count,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    pub fn into_dto(self) -> ProjectDto {
        ProjectDto {
            id: self.id,
            name: self.name,
            description: self.description,
            status: self.status,
            start_date: self.start_date,
            end_date: self.end_date,
            engineer_count: self.engineer_count,
            contractor_count: self.contractor_count,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateProjectParams {
    pub name: String,
    pub description: Option<String>,
    pub status: ProjectStatus,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

impl CreateProjectParams {
    pub fn from_dto(dto: CreateProjectDto) -> Self {
        Self {
            name: dto.name,
            description: dto.description,
            status: dto.status.unwrap_or(ProjectStatus::Active),
            start_date: dto.start_date,
            end_date: dto.end_date,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UpdateProjectParams {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<ProjectStatus>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

impl UpdateProjectParams {
    pub fn from_dto(dto: UpdateProjectDto) -> Self {
        Self {
            name: dto.name,
            description: dto.description,
            status: dto.status,
            start_date: dto.start_date,
            end_date: dto.end_date,
        }
    }
}

/// A user's membership in a project.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectMember {
    pub id: i32,
    pub project_id: i32,
    pub user_id: i32,
    pub username: String,
    pub full_name: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}

impl ProjectMember {
    pub fn from_entity(entity: entity::project_user::Model, user: entity::user::Model) -> Self {
        Self {
            id: entity.id,
            project_id: entity.project_id,
            user_id: entity.user_id,
            username: user.username,
            full_name: user.full_name,
            role: entity.role,
            created_at: entity.created_at,
        }
    }

    pub fn into_dto(self) -> ProjectUserDto {
        ProjectUserDto {
            id: self.id,
            project_id: self.project_id,
            user_id: self.user_id,
            username: self.username,
            full_name: self.full_name,
            role: self.role,
            created_at: self.created_at,
        }
    }
}

/// An employee's assignment to a project.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectAssignment {
    pub id: i32,
    pub project_id: i32,
    pub employee_id: i32,
    pub first_name: String,
    pub last_name: Option<String>,
    pub role: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ProjectAssignment {
    pub fn from_entity(
        entity: entity::project_employee::Model,
        employee: entity::employee::Model,
    ) -> Self {
        Self {
            id: entity.id,
            project_id: entity.project_id,
            employee_id: entity.employee_id,
            first_name: employee.first_name,
            last_name: employee.last_name,
            role: entity.role,
            created_at: entity.created_at,
        }
    }

    pub fn into_dto(self) -> ProjectEmployeeDto {
        ProjectEmployeeDto {
            id: self.id,
            project_id: self.project_id,
            employee_id: self.employee_id,
            first_name: self.first_name,
            last_name: self.last_name,
            role: self.role,
            created_at: self.created_at,
        }
    }
}
