use sea_orm::DatabaseConnection;

use crate::server::{
    data::stock_movement::StockMovementRepository,
    error::AppError,
    model::{
        pagination::{Paginated, Pagination},
        stock_movement::{StockMovement, StockMovementFilter},
    },
};

pub struct StockMovementService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> StockMovementService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get_paginated(
        &self,
        filter: &StockMovementFilter,
        pagination: Pagination,
    ) -> Result<Paginated<StockMovement>, AppError> {
        let (movements, total) = StockMovementRepository::new(self.db)
            .get_paginated(filter, pagination)
            .await?;

        Ok(Paginated::new(movements, total, pagination))
    }
}
