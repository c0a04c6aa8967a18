use sea_orm::DatabaseConnection;

use crate::server::{
    data::institution::InstitutionRepository,
    error::AppError,
    model::{
        institution::{CreateInstitutionParams, Institution, UpdateInstitutionParams},
        pagination::{Paginated, Pagination},
    },
    util::validation::Validator,
};

pub struct InstitutionService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> InstitutionService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get_paginated(
        &self,
        pagination: Pagination,
    ) -> Result<Paginated<Institution>, AppError> {
        let (institutions, total) = InstitutionRepository::new(self.db)
            .get_paginated(pagination)
            .await?;

        Ok(Paginated::new(institutions, total, pagination))
    }

    pub async fn create(&self, params: CreateInstitutionParams) -> Result<Institution, AppError> {
        Validator::new().not_blank(&params.name, "name").finish()?;

        let repo = InstitutionRepository::new(self.db);
        if let Some(code) = params.code.as_deref().filter(|c| !c.is_empty()) {
            if repo.code_taken(code, None).await? {
                return Err(AppError::BadRequest(
                    "Institution code already exists".to_string(),
                ));
            }
        }

        Ok(repo.create(params).await?)
    }

    pub async fn update(
        &self,
        id: i32,
        params: UpdateInstitutionParams,
    ) -> Result<Institution, AppError> {
        if let Some(name) = &params.name {
            Validator::new().not_blank(name, "name").finish()?;
        }

        let repo = InstitutionRepository::new(self.db);
        if let Some(code) = params.code.as_deref().filter(|c| !c.is_empty()) {
            if repo.code_taken(code, Some(id)).await? {
                return Err(AppError::BadRequest(
                    "Institution code already exists".to_string(),
                ));
            }
        }

        repo.update(id, params)
            .await?
            .ok_or_else(|| AppError::NotFound("Institution not found".to_string()))
    }

    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        if !InstitutionRepository::new(self.db).delete(id).await? {
            return Err(AppError::NotFound("Institution not found".to_string()));
        }

        Ok(())
    }
}
