use sea_orm::DatabaseConnection;

use crate::server::{
    data::{employee::EmployeeRepository, role::RoleRepository},
    error::AppError,
    model::{
        employee::{CreateEmployeeParams, Employee, UpdateEmployeeParams},
        pagination::{Paginated, Pagination},
    },
    util::validation::Validator,
};
use entity::enums::RoleKind;

pub struct EmployeeService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> EmployeeService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get_paginated(
        &self,
        search: Option<&str>,
        pagination: Pagination,
    ) -> Result<Paginated<Employee>, AppError> {
        let (employees, total) = EmployeeRepository::new(self.db)
            .get_paginated(search, pagination)
            .await?;

        Ok(Paginated::new(employees, total, pagination))
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Employee, AppError> {
        EmployeeRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Employee not found".to_string()))
    }

    pub async fn create(&self, params: CreateEmployeeParams) -> Result<Employee, AppError> {
        Validator::new()
            .not_blank(&params.first_name, "first_name")
            .finish()?;
        self.ensure_employee_role(params.role_id).await?;

        Ok(EmployeeRepository::new(self.db).create(params).await?)
    }

    pub async fn update(
        &self,
        id: i32,
        params: UpdateEmployeeParams,
    ) -> Result<Employee, AppError> {
        if let Some(first_name) = &params.first_name {
            Validator::new().not_blank(first_name, "first_name").finish()?;
        }
        if let Some(role_id) = params.role_id {
            self.ensure_employee_role(role_id).await?;
        }

        EmployeeRepository::new(self.db)
            .update(id, params)
            .await?
            .ok_or_else(|| AppError::NotFound("Employee not found".to_string()))
    }

    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        if !EmployeeRepository::new(self.db).soft_delete(id).await? {
            return Err(AppError::NotFound("Employee not found".to_string()));
        }

        Ok(())
    }

    /// Rejects role ids that do not name a live role of kind `employee`.
    async fn ensure_employee_role(&self, role_id: i32) -> Result<(), AppError> {
        let role = RoleRepository::new(self.db).find_by_id(role_id).await?;

        match role {
            Some(role) if role.kind == RoleKind::Employee => Ok(()),
            _ => Err(AppError::invalid_field(
                "role_id",
                "role_id must reference an existing employee role",
            )),
        }
    }
}
