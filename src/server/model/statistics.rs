//! Aggregates reported by the statistics endpoints.

use chrono::{DateTime, Duration, Utc};

use crate::model::statistics::{
    DateRangeDto, DeliveryPerformanceDto, MaterialUsageDto, MovementSummaryDto,
    OverallStatisticsDto, ProjectMaterialUsageDto, StatusCountDto, StockLevel,
    StockLevelAnalysisDto, StockLevelItemDto,
};
use entity::enums::{MovementKind, RequestStatus};

/// Days covered when a statistics request gives no range.
pub const DEFAULT_RANGE_DAYS: i64 = 30;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateRange {
    /// Fills missing bounds: the end defaults to now and the start to
    /// `DEFAULT_RANGE_DAYS` before the end.
    pub fn resolve(start: Option<DateTime<Utc>>, end: Option<DateTime<Utc>>) -> Self {
        let end = end.unwrap_or_else(Utc::now);
        let start = start.unwrap_or(end - Duration::days(DEFAULT_RANGE_DAYS));
        Self { start, end }
    }

    pub fn into_dto(self) -> DateRangeDto {
        DateRangeDto {
            start_date: self.start,
            end_date: self.end,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatusCount {
    pub status: RequestStatus,
    pub count: u64,
}

impl StatusCount {
    pub fn into_dto(self) -> StatusCountDto {
        StatusCountDto {
            status: self.status,
            count: self.count,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OverallStatistics {
    pub materials: u64,
    pub projects: u64,
    pub warehouses: u64,
    pub users: u64,
    pub requests_by_status: Vec<StatusCount>,
    pub completed_deliveries: u64,
    pub low_stock_materials: u64,
}

impl OverallStatistics {
    pub fn into_dto(self) -> OverallStatisticsDto {
        OverallStatisticsDto {
            materials: self.materials,
            projects: self.projects,
            warehouses: self.warehouses,
            users: self.users,
            requests_by_status: self
                .requests_by_status
                .into_iter()
                .map(StatusCount::into_dto)
                .collect(),
            completed_deliveries: self.completed_deliveries,
            low_stock_materials: self.low_stock_materials,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MovementSummary {
    pub kind: MovementKind,
    pub count: u64,
    pub total_quantity: f64,
}

impl MovementSummary {
    pub fn into_dto(self) -> MovementSummaryDto {
        MovementSummaryDto {
            kind: self.kind,
            count: self.count,
            total_quantity: self.total_quantity,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MaterialUsage {
    pub material_id: i32,
    pub code: String,
    pub name: String,
    pub total_quantity: f64,
    pub movement_count: u64,
}

impl MaterialUsage {
    pub fn into_dto(self) -> MaterialUsageDto {
        MaterialUsageDto {
            material_id: self.material_id,
            code: self.code,
            name: self.name,
            total_quantity: self.total_quantity,
            movement_count: self.movement_count,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectMaterialUsage {
    pub material_id: i32,
    pub code: String,
    pub name: String,
    pub requested_quantity: f64,
    pub delivered_quantity: f64,
    pub request_count: u64,
}

impl ProjectMaterialUsage {
    pub fn into_dto(self) -> ProjectMaterialUsageDto {
        ProjectMaterialUsageDto {
            material_id: self.material_id,
            code: self.code,
            name: self.name,
            requested_quantity: self.requested_quantity,
            delivered_quantity: self.delivered_quantity,
            request_count: self.request_count,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeliveryPerformance {
    pub range: DateRange,
    pub total: u64,
    pub completed: u64,
    pub pending: u64,
    pub average_delivery_hours: Option<f64>,
}

impl DeliveryPerformance {
    /// Completed share in percent, rounded to two decimals. Zero without deliveries.
    pub fn completion_rate(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        let rate = self.completed as f64 / self.total as f64 * 100.0;
        (rate * 100.0).round() / 100.0
    }

    pub fn into_dto(self) -> DeliveryPerformanceDto {
        DeliveryPerformanceDto {
            completion_rate: self.completion_rate(),
            range: self.range.into_dto(),
            total: self.total,
            completed: self.completed,
            pending: self.pending,
            average_delivery_hours: self.average_delivery_hours,
        }
    }
}

/// Classifies a material's stock against its minimum.
pub fn stock_level(stock_qty: f64, min_stock_qty: f64) -> StockLevel {
    if stock_qty <= 0.0 {
        StockLevel::OutOfStock
    } else if stock_qty <= min_stock_qty {
        StockLevel::Low
    } else {
        StockLevel::Ok
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StockLevelItem {
    pub material_id: i32,
    pub code: String,
    pub name: String,
    pub stock_qty: f64,
    pub min_stock_qty: f64,
    pub level: StockLevel,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StockLevelAnalysis {
    pub out_of_stock: u64,
    pub low: u64,
    pub ok: u64,
    pub attention: Vec<StockLevelItem>,
}

impl StockLevelAnalysis {
    pub fn into_dto(self) -> StockLevelAnalysisDto {
        StockLevelAnalysisDto {
            out_of_stock: self.out_of_stock,
            low: self.low,
            ok: self.ok,
            attention: self
                .attention
                .into_iter()
                .map(|item| StockLevelItemDto {
                    material_id: item.material_id,
                    code: item.code,
                    name: item.name,
                    stock_qty: item.stock_qty,
                    min_stock_qty: item.min_stock_qty,
                    level: item.level,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_stock_levels() {
        assert_eq!(stock_level(0.0, 5.0), StockLevel::OutOfStock);
        assert_eq!(stock_level(5.0, 5.0), StockLevel::Low);
        assert_eq!(stock_level(5.5, 5.0), StockLevel::Ok);
    }

    #[test]
    fn range_defaults_to_last_thirty_days() {
        let end = Utc::now();
        let range = DateRange::resolve(None, Some(end));

        assert_eq!(range.end - range.start, Duration::days(30));
    }
}
