use sea_orm::DatabaseConnection;

use crate::server::{
    data::role::RoleRepository,
    error::AppError,
    model::{
        pagination::{Paginated, Pagination},
        role::{CreateRoleParams, Role, UpdateRoleParams},
    },
    util::validation::Validator,
};
use entity::enums::RoleKind;

pub struct RoleService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> RoleService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get_paginated(
        &self,
        kind: Option<RoleKind>,
        pagination: Pagination,
    ) -> Result<Paginated<Role>, AppError> {
        let (roles, total) = RoleRepository::new(self.db)
            .get_paginated(kind, pagination)
            .await?;

        Ok(Paginated::new(roles, total, pagination))
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Role, AppError> {
        RoleRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Role not found".to_string()))
    }

    pub async fn create(&self, params: CreateRoleParams) -> Result<Role, AppError> {
        Validator::new().not_blank(&params.name, "name").finish()?;

        Ok(RoleRepository::new(self.db).create(params).await?)
    }

    /// Updates a role. System roles are read-only.
    pub async fn update(&self, id: i32, params: UpdateRoleParams) -> Result<Role, AppError> {
        if let Some(name) = &params.name {
            Validator::new().not_blank(name, "name").finish()?;
        }

        let role = self.get_by_id(id).await?;
        if role.is_system {
            return Err(AppError::BadRequest(
                "System roles cannot be modified".to_string(),
            ));
        }

        RoleRepository::new(self.db)
            .update(id, params)
            .await?
            .ok_or_else(|| AppError::NotFound("Role not found".to_string()))
    }

    /// Soft deletes a role that is neither a system role nor held by any employee.
    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        let repo = RoleRepository::new(self.db);

        let role = self.get_by_id(id).await?;
        if role.is_system {
            return Err(AppError::BadRequest(
                "System roles cannot be deleted".to_string(),
            ));
        }
        if repo.employee_count(id).await? > 0 {
            return Err(AppError::BadRequest(
                "Role is assigned to employees and cannot be deleted".to_string(),
            ));
        }

        repo.soft_delete(id).await?;

        Ok(())
    }
}
