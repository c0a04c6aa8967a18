use chrono::{DateTime, Utc};

use crate::model::delivery::DeliveryDto;
use entity::enums::DeliveryStatus;

#[derive(Debug, Clone, PartialEq)]
pub struct Delivery {
    pub id: i32,
    pub request_id: i32,
    pub delivered_by: i32,
    pub received_by: Option<i32>,
    pub status: DeliveryStatus,
    pub delivery_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Delivery {
    pub fn from_entity(entity: entity::delivery::Model) -> Self {
        Self {
            id: entity.id,
            request_id: entity.request_id,
            delivered_by: entity.delivered_by,
            received_by: entity.received_by,
            status: entity.status,
            delivery_date: entity.delivery_date,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    pub fn into_dto(self) -> DeliveryDto {
        DeliveryDto {
            id: self.id,
            request_id: self.request_id,
            delivered_by: self.delivered_by,
            received_by: self.received_by,
            status: self.status,
            delivery_date: self.delivery_date,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Result of completing a delivery: the new delivery plus the stock it left behind.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletedDelivery {
    pub delivery: Delivery,
    pub material_id: i32,
    pub material_name: String,
    pub requested_by: i32,
    pub new_stock: f64,
    pub min_stock_qty: f64,
}
