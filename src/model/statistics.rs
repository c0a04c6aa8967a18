use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use entity::enums::{MovementKind, RequestStatus};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StatusCountDto {
    pub status: RequestStatus,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct OverallStatisticsDto {
    pub materials: u64,
    pub projects: u64,
    pub warehouses: u64,
    pub users: u64,
    pub requests_by_status: Vec<StatusCountDto>,
    pub completed_deliveries: u64,
    pub low_stock_materials: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MovementSummaryDto {
    pub kind: MovementKind,
    pub count: u64,
    pub total_quantity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DateRangeDto {
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StockMovementStatisticsDto {
    pub range: DateRangeDto,
    pub movements: Vec<MovementSummaryDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RequestStatusDistributionDto {
    pub range: DateRangeDto,
    pub distribution: Vec<StatusCountDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MaterialUsageDto {
    pub material_id: i32,
    pub code: String,
    pub name: String,
    pub total_quantity: f64,
    pub movement_count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProjectMaterialUsageDto {
    pub material_id: i32,
    pub code: String,
    pub name: String,
    pub requested_quantity: f64,
    pub delivered_quantity: f64,
    pub request_count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DeliveryPerformanceDto {
    pub range: DateRangeDto,
    pub total: u64,
    pub completed: u64,
    pub pending: u64,
    /// Completed deliveries as a percentage of all deliveries in the range.
    pub completion_rate: f64,
    pub average_delivery_hours: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StockLevelItemDto {
    pub material_id: i32,
    pub code: String,
    pub name: String,
    pub stock_qty: f64,
    pub min_stock_qty: f64,
    pub level: StockLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum StockLevel {
    OutOfStock,
    Low,
    Ok,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StockLevelAnalysisDto {
    pub out_of_stock: u64,
    pub low: u64,
    pub ok: u64,
    pub attention: Vec<StockLevelItemDto>,
}
