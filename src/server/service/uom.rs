use sea_orm::DatabaseConnection;

use crate::server::{
    data::uom::UomRepository,
    error::AppError,
    model::{
        pagination::{Paginated, Pagination},
        uom::Uom,
    },
    util::validation::Validator,
};

pub struct UomService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UomService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get_paginated(&self, pagination: Pagination) -> Result<Paginated<Uom>, AppError> {
        let (uoms, total) = UomRepository::new(self.db).get_paginated(pagination).await?;

        Ok(Paginated::new(uoms, total, pagination))
    }

    /// Creates a unit of measure. Symbols are unique.
    pub async fn create(&self, name: String, symbol: String) -> Result<Uom, AppError> {
        Validator::new()
            .not_blank(&name, "name")
            .not_blank(&symbol, "symbol")
            .finish()?;

        let repo = UomRepository::new(self.db);
        let symbol = symbol.trim().to_string();
        if repo.symbol_exists(&symbol).await? {
            return Err(AppError::BadRequest(
                "Unit of measure symbol already exists".to_string(),
            ));
        }

        Ok(repo.create(name.trim().to_string(), symbol).await?)
    }
}
