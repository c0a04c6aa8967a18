use chrono::{DateTime, Utc};

use crate::model::employee::{CreateEmployeeDto, EmployeeDto, UpdateEmployeeDto};

#[derive(Debug, Clone, PartialEq)]
pub struct Employee {
    pub id: i32,
    pub first_name: String,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub role_id: i32,
    /// Name of the employee's role when it was loaded alongside.
    pub role_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Employee {
    pub fn from_entity(
        entity: entity::employee::Model,
        role: Option<entity::role::Model>,
    ) -> Self {
        Self {
            id: entity.id,
            first_name: entity.first_name,
            last_name: entity.last_name,
            phone: entity.phone,
            role_id: entity.role_id,
            role_name: role.map(|r| r.name),
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    pub fn into_dto(self) -> EmployeeDto {
        EmployeeDto {
            id: self.id,
            first_name: self.first_name,
            last_name: self.last_name,
            phone: self.phone,
            role_id: self.role_id,
            role_name: self.role_name,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateEmployeeParams {
    pub first_name: String,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub role_id: i32,
}

impl CreateEmployeeParams {
    pub fn from_dto(dto: CreateEmployeeDto) -> Self {
        Self {
            first_name: dto.first_name,
            last_name: dto.last_name,
            phone: dto.phone,
            role_id: dto.role_id,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UpdateEmployeeParams {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub role_id: Option<i32>,
}

impl UpdateEmployeeParams {
    pub fn from_dto(dto: UpdateEmployeeDto) -> Self {
        Self {
            first_name: dto.first_name,
            last_name: dto.last_name,
            phone: dto.phone,
            role_id: dto.role_id,
        }
    }
}
