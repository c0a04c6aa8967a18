use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use entity::enums::DeliveryStatus;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DeliveryDto {
    pub id: i32,
    pub request_id: i32,
    pub delivered_by: i32,
    pub received_by: Option<i32>,
    pub status: DeliveryStatus,
    pub delivery_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct CompleteDeliveryDto {
    pub received_by: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateDeliveryStatusDto {
    pub status: DeliveryStatus,
}
