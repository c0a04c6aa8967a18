use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use entity::enums::{MovementKind, StockReference};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StockMovementDto {
    pub id: i32,
    pub material_id: i32,
    pub user_id: i32,
    pub kind: MovementKind,
    pub quantity: f64,
    pub previous_stock: f64,
    pub new_stock: f64,
    pub reference_type: StockReference,
    pub reference_id: Option<i32>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}
