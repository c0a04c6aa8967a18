use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::model::{
    pagination::Pagination,
    stock_movement::{RecordMovementParams, StockMovement, StockMovementFilter},
};
use entity::enums::MovementKind;

pub struct StockMovementRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> StockMovementRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Records a stock change.
    ///
    /// The kind is `in` when the stock grew and `out` otherwise. The quantity is the
    /// absolute difference between previous and new stock.
    pub async fn record(&self, params: RecordMovementParams) -> Result<StockMovement, DbErr> {
        let kind = if params.new_stock > params.previous_stock {
            MovementKind::In
        } else {
            MovementKind::Out
        };

        let entity = entity::stock_movement::ActiveModel {
            material_id: ActiveValue::Set(params.material_id),
            user_id: ActiveValue::Set(params.user_id),
            kind: ActiveValue::Set(kind),
            quantity: ActiveValue::Set((params.new_stock - params.previous_stock).abs()),
            previous_stock: ActiveValue::Set(params.previous_stock),
            new_stock: ActiveValue::Set(params.new_stock),
            reference_type: ActiveValue::Set(params.reference_type),
            reference_id: ActiveValue::Set(params.reference_id),
            notes: ActiveValue::Set(params.notes),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(StockMovement::from_entity(entity))
    }

    /// Gets a filtered page of stock movements, newest first.
    pub async fn get_paginated(
        &self,
        filter: &StockMovementFilter,
        pagination: Pagination,
    ) -> Result<(Vec<StockMovement>, u64), DbErr> {
        let mut query = entity::prelude::StockMovement::find()
            .order_by_desc(entity::stock_movement::Column::CreatedAt)
            .order_by_desc(entity::stock_movement::Column::Id);

        if let Some(material_id) = filter.material_id {
            query = query.filter(entity::stock_movement::Column::MaterialId.eq(material_id));
        }
        if let Some(kind) = filter.kind {
            query = query.filter(entity::stock_movement::Column::Kind.eq(kind));
        }
        if let Some(start) = filter.start_date {
            query = query.filter(entity::stock_movement::Column::CreatedAt.gte(start));
        }
        if let Some(end) = filter.end_date {
            query = query.filter(entity::stock_movement::Column::CreatedAt.lte(end));
        }

        let paginator = query.paginate(self.db, pagination.per_page);
        let total = paginator.num_items().await?;
        let movements = paginator
            .fetch_page(pagination.index())
            .await?
            .into_iter()
            .map(StockMovement::from_entity)
            .collect();

        Ok((movements, total))
    }
}
