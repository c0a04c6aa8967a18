//! Read-only aggregate queries behind the statistics endpoints.
//!
//! Simple counts are grouped in SQL. Aggregates that combine rows from several tables are
//! folded in Rust after a filtered fetch, which keeps them portable between SQLite and
//! Postgres.

use std::collections::{BTreeMap, HashMap};

use sea_orm::{
    sea_query::Expr, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect,
};

use crate::server::model::statistics::{
    DateRange, DeliveryPerformance, MaterialUsage, MovementSummary, ProjectMaterialUsage,
    StatusCount,
};
use entity::enums::{DeliveryStatus, MovementKind, RequestStatus};

pub struct StatisticsRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> StatisticsRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Counts requests per status, optionally limited to requests created within `range`.
    ///
    /// # Returns
    /// - `Ok(Vec<StatusCount>)` - One entry per status that has at least one request
    /// - `Err(DbErr)` - Database error during query
    pub async fn requests_by_status(
        &self,
        range: Option<DateRange>,
    ) -> Result<Vec<StatusCount>, DbErr> {
        let mut query = entity::prelude::Request::find()
            .select_only()
            .column(entity::request::Column::Status)
            .column_as(Expr::col(entity::request::Column::Id).count(), "count")
            .group_by(entity::request::Column::Status);

        if let Some(range) = range {
            query = query
                .filter(entity::request::Column::CreatedAt.gte(range.start))
                .filter(entity::request::Column::CreatedAt.lte(range.end));
        }

        let rows: Vec<(RequestStatus, i64)> = query.into_tuple().all(self.db).await?;

        Ok(rows
            .into_iter()
            .map(|(status, count)| StatusCount {
                status,
                count: count as u64,
            })
            .collect())
    }

    pub async fn count_deliveries(&self, status: DeliveryStatus) -> Result<u64, DbErr> {
        entity::prelude::Delivery::find()
            .filter(entity::delivery::Column::Status.eq(status))
            .count(self.db)
            .await
    }

    /// Counts stock movements and sums their quantity per kind within `range`.
    pub async fn movement_summary(&self, range: DateRange) -> Result<Vec<MovementSummary>, DbErr> {
        let rows: Vec<(MovementKind, i64, Option<f64>)> = entity::prelude::StockMovement::find()
            .select_only()
            .column(entity::stock_movement::Column::Kind)
            .column_as(Expr::col(entity::stock_movement::Column::Id).count(), "count")
            .column_as(
                Expr::col(entity::stock_movement::Column::Quantity).sum(),
                "total_quantity",
            )
            .filter(entity::stock_movement::Column::CreatedAt.gte(range.start))
            .filter(entity::stock_movement::Column::CreatedAt.lte(range.end))
            .group_by(entity::stock_movement::Column::Kind)
            .into_tuple()
            .all(self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(kind, count, total)| MovementSummary {
                kind,
                count: count as u64,
                total_quantity: total.unwrap_or(0.0),
            })
            .collect())
    }

    /// Ranks materials by the total quantity of their `out` stock movements.
    ///
    /// # Arguments
    /// - `limit` - Maximum number of materials to return
    ///
    /// # Returns
    /// - `Ok(Vec<MaterialUsage>)` - Materials with the largest outflow first
    /// - `Err(DbErr)` - Database error during query
    pub async fn most_used_materials(&self, limit: u64) -> Result<Vec<MaterialUsage>, DbErr> {
        let rows: Vec<(i32, i64, Option<f64>)> = entity::prelude::StockMovement::find()
            .select_only()
            .column(entity::stock_movement::Column::MaterialId)
            .column_as(Expr::col(entity::stock_movement::Column::Id).count(), "count")
            .column_as(
                Expr::col(entity::stock_movement::Column::Quantity).sum(),
                "total_quantity",
            )
            .filter(entity::stock_movement::Column::Kind.eq(MovementKind::Out))
            .group_by(entity::stock_movement::Column::MaterialId)
            .order_by_desc(Expr::col(entity::stock_movement::Column::Quantity).sum())
            .limit(limit)
            .into_tuple()
            .all(self.db)
            .await?;

        let materials = self
            .materials_by_id(rows.iter().map(|(id, _, _)| *id).collect())
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(material_id, count, total)| {
                materials.get(&material_id).map(|m| MaterialUsage {
                    material_id,
                    code: m.code.clone(),
                    name: m.name.clone(),
                    total_quantity: total.unwrap_or(0.0),
                    movement_count: count as u64,
                })
            })
            .collect())
    }

    /// Sums requested and delivered quantities per material for one project.
    ///
    /// The delivered quantity of a request is its revised quantity when set, else the
    /// requested quantity, and only counts once the request reached `delivered`.
    pub async fn project_material_usage(
        &self,
        project_id: i32,
    ) -> Result<Vec<ProjectMaterialUsage>, DbErr> {
        let requests = entity::prelude::Request::find()
            .filter(entity::request::Column::ProjectId.eq(project_id))
            .all(self.db)
            .await?;

        // material_id -> (requested, delivered, count)
        let mut totals: BTreeMap<i32, (f64, f64, u64)> = BTreeMap::new();
        for request in &requests {
            let entry = totals.entry(request.material_id).or_default();
            entry.0 += request.requested_qty;
            if request.status == RequestStatus::Delivered {
                entry.1 += request.revised_qty.unwrap_or(request.requested_qty);
            }
            entry.2 += 1;
        }

        let materials = self.materials_by_id(totals.keys().copied().collect()).await?;

        Ok(totals
            .into_iter()
            .filter_map(|(material_id, (requested, delivered, count))| {
                materials.get(&material_id).map(|m| ProjectMaterialUsage {
                    material_id,
                    code: m.code.clone(),
                    name: m.name.clone(),
                    requested_quantity: requested,
                    delivered_quantity: delivered,
                    request_count: count,
                })
            })
            .collect())
    }

    /// Summarises deliveries created within `range`.
    ///
    /// The average is taken over completed deliveries that have a delivery date, measured
    /// from the creation of the request they fulfil.
    pub async fn delivery_performance(
        &self,
        range: DateRange,
    ) -> Result<DeliveryPerformance, DbErr> {
        let rows = entity::prelude::Delivery::find()
            .filter(entity::delivery::Column::CreatedAt.gte(range.start))
            .filter(entity::delivery::Column::CreatedAt.lte(range.end))
            .find_also_related(entity::prelude::Request)
            .all(self.db)
            .await?;

        let total = rows.len() as u64;
        let mut completed = 0u64;
        let mut hours = Vec::new();

        for (delivery, request) in &rows {
            if delivery.status != DeliveryStatus::Completed {
                continue;
            }
            completed += 1;
            if let (Some(delivered_at), Some(request)) = (delivery.delivery_date, request) {
                let elapsed = delivered_at - request.created_at;
                hours.push(elapsed.num_seconds() as f64 / 3600.0);
            }
        }

        let average_delivery_hours = if hours.is_empty() {
            None
        } else {
            let average = hours.iter().sum::<f64>() / hours.len() as f64;
            Some((average * 100.0).round() / 100.0)
        };

        Ok(DeliveryPerformance {
            range,
            total,
            completed,
            pending: total - completed,
            average_delivery_hours,
        })
    }

    async fn materials_by_id(
        &self,
        ids: Vec<i32>,
    ) -> Result<HashMap<i32, entity::material::Model>, DbErr> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        Ok(entity::prelude::Material::find()
            .filter(entity::material::Column::Id.is_in(ids))
            .all(self.db)
            .await?
            .into_iter()
            .map(|m| (m.id, m))
            .collect())
    }
}
