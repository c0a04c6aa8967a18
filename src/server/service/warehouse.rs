use sea_orm::DatabaseConnection;

use crate::server::{
    data::warehouse::WarehouseRepository,
    error::AppError,
    model::{
        pagination::{Paginated, Pagination},
        warehouse::{CreateWarehouseParams, UpdateWarehouseParams, Warehouse},
    },
    util::validation::Validator,
};

pub struct WarehouseService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> WarehouseService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get_paginated(
        &self,
        is_active: Option<bool>,
        pagination: Pagination,
    ) -> Result<Paginated<Warehouse>, AppError> {
        let (warehouses, total) = WarehouseRepository::new(self.db)
            .get_paginated(is_active, pagination)
            .await?;

        Ok(Paginated::new(warehouses, total, pagination))
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Warehouse, AppError> {
        WarehouseRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Warehouse not found".to_string()))
    }

    pub async fn create(&self, params: CreateWarehouseParams) -> Result<Warehouse, AppError> {
        Validator::new()
            .not_blank(&params.code, "code")
            .not_blank(&params.name, "name")
            .finish()?;

        let repo = WarehouseRepository::new(self.db);
        if repo.code_taken(&params.code, None).await? {
            return Err(AppError::BadRequest(
                "Warehouse code already exists".to_string(),
            ));
        }

        Ok(repo.create(params).await?)
    }

    pub async fn update(
        &self,
        id: i32,
        params: UpdateWarehouseParams,
    ) -> Result<Warehouse, AppError> {
        let mut validator = Validator::new();
        if let Some(code) = &params.code {
            validator.not_blank(code, "code");
        }
        if let Some(name) = &params.name {
            validator.not_blank(name, "name");
        }
        validator.finish()?;

        let repo = WarehouseRepository::new(self.db);
        if let Some(code) = &params.code {
            if repo.code_taken(code, Some(id)).await? {
                return Err(AppError::BadRequest(
                    "Warehouse code already exists".to_string(),
                ));
            }
        }

        repo.update(id, params)
            .await?
            .ok_or_else(|| AppError::NotFound("Warehouse not found".to_string()))
    }

    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        if !WarehouseRepository::new(self.db).soft_delete(id).await? {
            return Err(AppError::NotFound("Warehouse not found".to_string()));
        }

        Ok(())
    }
}
