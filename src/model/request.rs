use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use entity::enums::RequestStatus;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RequestDto {
    pub id: i32,
    pub requested_by: i32,
    pub material_id: i32,
    pub project_id: i32,
    pub requested_qty: f64,
    pub revised_qty: Option<f64>,
    pub status: RequestStatus,
    pub request_note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateRequestDto {
    pub material_id: i32,
    pub project_id: i32,
    pub requested_qty: f64,
    pub request_note: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateRequestDto {
    pub revised_qty: Option<f64>,
    pub request_note: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateRequestStatusDto {
    pub status: RequestStatus,
}
