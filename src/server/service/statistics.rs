//! Reporting aggregates over materials, requests, deliveries and stock movements.

use sea_orm::DatabaseConnection;

use crate::server::{
    data::{
        material::MaterialRepository, project::ProjectRepository,
        statistics::StatisticsRepository, user::UserRepository, warehouse::WarehouseRepository,
    },
    error::AppError,
    model::statistics::{
        stock_level, DateRange, DeliveryPerformance, MaterialUsage, MovementSummary,
        OverallStatistics, ProjectMaterialUsage, StatusCount, StockLevelAnalysis,
        StockLevelItem,
    },
};
use crate::model::statistics::StockLevel;
use entity::enums::DeliveryStatus;

pub const DEFAULT_MOST_USED_LIMIT: u64 = 10;
pub const MAX_MOST_USED_LIMIT: u64 = 100;

pub struct StatisticsService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> StatisticsService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn overall(&self) -> Result<OverallStatistics, AppError> {
        let materials = MaterialRepository::new(self.db);
        let stats = StatisticsRepository::new(self.db);

        Ok(OverallStatistics {
            materials: materials.count().await?,
            projects: ProjectRepository::new(self.db).count().await?,
            warehouses: WarehouseRepository::new(self.db).count().await?,
            users: UserRepository::new(self.db).count().await?,
            requests_by_status: stats.requests_by_status(None).await?,
            completed_deliveries: stats.count_deliveries(DeliveryStatus::Completed).await?,
            low_stock_materials: materials.count_low_stock().await?,
        })
    }

    pub async fn stock_movements(&self, range: DateRange) -> Result<Vec<MovementSummary>, AppError> {
        Ok(StatisticsRepository::new(self.db)
            .movement_summary(range)
            .await?)
    }

    pub async fn request_distribution(
        &self,
        range: DateRange,
    ) -> Result<Vec<StatusCount>, AppError> {
        Ok(StatisticsRepository::new(self.db)
            .requests_by_status(Some(range))
            .await?)
    }

    /// Ranks materials by outgoing quantity. `limit` defaults to 10 and is capped at 100.
    pub async fn most_used_materials(
        &self,
        limit: Option<u64>,
    ) -> Result<Vec<MaterialUsage>, AppError> {
        Ok(StatisticsRepository::new(self.db)
            .most_used_materials(most_used_limit(limit))
            .await?)
    }

    pub async fn project_material_usage(
        &self,
        project_id: i32,
    ) -> Result<Vec<ProjectMaterialUsage>, AppError> {
        if !ProjectRepository::new(self.db).exists(project_id).await? {
            return Err(AppError::NotFound("Project not found".to_string()));
        }

        Ok(StatisticsRepository::new(self.db)
            .project_material_usage(project_id)
            .await?)
    }

    pub async fn delivery_performance(
        &self,
        range: DateRange,
    ) -> Result<DeliveryPerformance, AppError> {
        Ok(StatisticsRepository::new(self.db)
            .delivery_performance(range)
            .await?)
    }

    /// Buckets every material by stock level and lists those needing attention,
    /// emptiest first.
    pub async fn stock_level_analysis(&self) -> Result<StockLevelAnalysis, AppError> {
        let materials = MaterialRepository::new(self.db).get_all().await?;

        let mut analysis = StockLevelAnalysis {
            out_of_stock: 0,
            low: 0,
            ok: 0,
            attention: Vec::new(),
        };

        for material in materials {
            let level = stock_level(material.stock_qty, material.min_stock_qty);
            match level {
                StockLevel::OutOfStock => analysis.out_of_stock += 1,
                StockLevel::Low => analysis.low += 1,
                StockLevel::Ok => {
                    analysis.ok += 1;
                    continue;
                }
            }

            analysis.attention.push(StockLevelItem {
                material_id: material.id,
                code: material.code,
                name: material.name,
                stock_qty: material.stock_qty,
                min_stock_qty: material.min_stock_qty,
                level,
            });
        }

        analysis
            .attention
            .sort_by(|a, b| a.stock_qty.total_cmp(&b.stock_qty));

        Ok(analysis)
    }
}

/// Resolves the `limit` query value: missing becomes 10, and the result is kept within
/// `1..=100`.
pub fn most_used_limit(limit: Option<u64>) -> u64 {
    limit
        .unwrap_or(DEFAULT_MOST_USED_LIMIT)
        .clamp(1, MAX_MOST_USED_LIMIT)
}
