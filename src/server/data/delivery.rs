use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::model::{delivery::Delivery, pagination::Pagination};
use entity::enums::DeliveryStatus;

/// Repository for delivery records. Generic over the connection for use inside the
/// completion transaction.
pub struct DeliveryRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> DeliveryRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a completed delivery for a request.
    ///
    /// # Arguments
    /// - `request_id` - Request being fulfilled
    /// - `delivered_by` - User completing the delivery
    /// - `received_by` - Optional user who received the goods
    /// - `delivery_date` - Completion timestamp
    ///
    /// # Returns
    /// - `Ok(Delivery)` - The created delivery
    /// - `Err(DbErr)` - Database error, including a unique violation when the request already
    ///   has a delivery
    pub async fn create_completed(
        &self,
        request_id: i32,
        delivered_by: i32,
        received_by: Option<i32>,
        delivery_date: DateTime<Utc>,
    ) -> Result<Delivery, DbErr> {
        let now = Utc::now();
        let entity = entity::delivery::ActiveModel {
            request_id: ActiveValue::Set(request_id),
            delivered_by: ActiveValue::Set(delivered_by),
            received_by: ActiveValue::Set(received_by),
            status: ActiveValue::Set(DeliveryStatus::Completed),
            delivery_date: ActiveValue::Set(Some(delivery_date)),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Delivery::from_entity(entity))
    }

    pub async fn exists_for_request(&self, request_id: i32) -> Result<bool, DbErr> {
        let count = entity::prelude::Delivery::find()
            .filter(entity::delivery::Column::RequestId.eq(request_id))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Gets a page of deliveries, newest first, optionally filtered by status.
    pub async fn get_paginated(
        &self,
        status: Option<DeliveryStatus>,
        pagination: Pagination,
    ) -> Result<(Vec<Delivery>, u64), DbErr> {
        let mut query = entity::prelude::Delivery::find()
            .order_by_desc(entity::delivery::Column::CreatedAt)
            .order_by_desc(entity::delivery::Column::Id);
        if let Some(status) = status {
            query = query.filter(entity::delivery::Column::Status.eq(status));
        }

        let paginator = query.paginate(self.db, pagination.per_page);
        let total = paginator.num_items().await?;
        let deliveries = paginator
            .fetch_page(pagination.index())
            .await?
            .into_iter()
            .map(Delivery::from_entity)
            .collect();

        Ok((deliveries, total))
    }

    /// Sets the status of a delivery. Moving to `completed` also stamps `delivery_date`.
    ///
    /// # Returns
    /// - `Ok(Some(Delivery))` - Updated delivery
    /// - `Ok(None)` - No delivery with that id
    pub async fn set_status(
        &self,
        id: i32,
        status: DeliveryStatus,
    ) -> Result<Option<Delivery>, DbErr> {
        let Some(model) = entity::prelude::Delivery::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let now = Utc::now();
        let mut active: entity::delivery::ActiveModel = model.into();
        active.status = ActiveValue::Set(status);
        if status == DeliveryStatus::Completed {
            active.delivery_date = ActiveValue::Set(Some(now));
        }
        active.updated_at = ActiveValue::Set(now);

        Ok(Some(Delivery::from_entity(active.update(self.db).await?)))
    }
}
