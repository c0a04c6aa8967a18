//! Read-only reporting endpoints. Ranged reports default to the last 30 days.

use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    model::{
        api::{DataDto, ErrorDto},
        statistics::{
            DeliveryPerformanceDto, MaterialUsageDto, OverallStatisticsDto,
            ProjectMaterialUsageDto, RequestStatusDistributionDto, StockLevelAnalysisDto,
            StockMovementStatisticsDto,
        },
    },
    server::{
        controller::data,
        error::AppError,
        middleware::auth::{AuthGuard, BearerToken, Permission},
        model::statistics::DateRange,
        service::statistics::StatisticsService,
        state::AppState,
    },
};

pub static STATISTICS_TAG: &str = "statistics";

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RangeQuery {
    /// Range start (RFC 3339), defaults to 30 days before the end
    pub start_date: Option<DateTime<Utc>>,
    /// Range end (RFC 3339), defaults to now
    pub end_date: Option<DateTime<Utc>>,
}

impl RangeQuery {
    fn range(&self) -> DateRange {
        DateRange::resolve(self.start_date, self.end_date)
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LimitQuery {
    /// Number of materials (default 10, max 100)
    pub limit: Option<u64>,
}

#[utoipa::path(
    get,
    path = "/api/statistics/overall",
    tag = STATISTICS_TAG,
    responses(
        (status = 200, description = "Headline counts", body = DataDto<OverallStatisticsDto>),
        (status = 403, description = "Insufficient permissions", body = ErrorDto)
    ),
    security(("bearer_auth" = [])),
)]
pub async fn get_overall(
    State(state): State<AppState>,
    token: BearerToken,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[Permission::Engineering])
        .await?;

    let overall = StatisticsService::new(&state.db).overall().await?;

    Ok(data(overall.into_dto()))
}

#[utoipa::path(
    get,
    path = "/api/statistics/stock-movements",
    tag = STATISTICS_TAG,
    params(RangeQuery),
    responses(
        (status = 200, description = "Movement count and quantity per kind", body = DataDto<StockMovementStatisticsDto>)
    ),
    security(("bearer_auth" = [])),
)]
pub async fn get_stock_movement_statistics(
    State(state): State<AppState>,
    token: BearerToken,
    Query(query): Query<RangeQuery>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[Permission::ManageStock])
        .await?;

    let range = query.range();
    let movements = StatisticsService::new(&state.db)
        .stock_movements(range)
        .await?;

    Ok(data(StockMovementStatisticsDto {
        range: range.into_dto(),
        movements: movements.into_iter().map(|m| m.into_dto()).collect(),
    }))
}

#[utoipa::path(
    get,
    path = "/api/statistics/request-status-distribution",
    tag = STATISTICS_TAG,
    params(RangeQuery),
    responses(
        (status = 200, description = "Request count per status", body = DataDto<RequestStatusDistributionDto>)
    ),
    security(("bearer_auth" = [])),
)]
pub async fn get_request_status_distribution(
    State(state): State<AppState>,
    token: BearerToken,
    Query(query): Query<RangeQuery>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[Permission::ViewReports])
        .await?;

    let range = query.range();
    let distribution = StatisticsService::new(&state.db)
        .request_distribution(range)
        .await?;

    Ok(data(RequestStatusDistributionDto {
        range: range.into_dto(),
        distribution: distribution.into_iter().map(|s| s.into_dto()).collect(),
    }))
}

#[utoipa::path(
    get,
    path = "/api/statistics/most-used-materials",
    tag = STATISTICS_TAG,
    params(LimitQuery),
    responses(
        (status = 200, description = "Materials ranked by outgoing quantity", body = DataDto<Vec<MaterialUsageDto>>)
    ),
    security(("bearer_auth" = [])),
)]
pub async fn get_most_used_materials(
    State(state): State<AppState>,
    token: BearerToken,
    Query(query): Query<LimitQuery>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[Permission::ManageStock])
        .await?;

    let usage = StatisticsService::new(&state.db)
        .most_used_materials(query.limit)
        .await?;

    Ok(data(
        usage.into_iter().map(|u| u.into_dto()).collect::<Vec<_>>(),
    ))
}

#[utoipa::path(
    get,
    path = "/api/statistics/project-material-usage/{project_id}",
    tag = STATISTICS_TAG,
    params(("project_id" = i32, Path, description = "Project ID")),
    responses(
        (status = 200, description = "Requested and delivered quantity per material", body = DataDto<Vec<ProjectMaterialUsageDto>>),
        (status = 404, description = "Project not found", body = ErrorDto)
    ),
    security(("bearer_auth" = [])),
)]
pub async fn get_project_material_usage(
    State(state): State<AppState>,
    token: BearerToken,
    Path(project_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[Permission::Engineering])
        .await?;

    let usage = StatisticsService::new(&state.db)
        .project_material_usage(project_id)
        .await?;

    Ok(data(
        usage.into_iter().map(|u| u.into_dto()).collect::<Vec<_>>(),
    ))
}

#[utoipa::path(
    get,
    path = "/api/statistics/delivery-performance",
    tag = STATISTICS_TAG,
    params(RangeQuery),
    responses(
        (status = 200, description = "Delivery completion figures", body = DataDto<DeliveryPerformanceDto>)
    ),
    security(("bearer_auth" = [])),
)]
pub async fn get_delivery_performance(
    State(state): State<AppState>,
    token: BearerToken,
    Query(query): Query<RangeQuery>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[Permission::ManageStock])
        .await?;

    let performance = StatisticsService::new(&state.db)
        .delivery_performance(query.range())
        .await?;

    Ok(data(performance.into_dto()))
}

#[utoipa::path(
    get,
    path = "/api/statistics/stock-level-analysis",
    tag = STATISTICS_TAG,
    responses(
        (status = 200, description = "Materials bucketed by stock level", body = DataDto<StockLevelAnalysisDto>)
    ),
    security(("bearer_auth" = [])),
)]
pub async fn get_stock_level_analysis(
    State(state): State<AppState>,
    token: BearerToken,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[Permission::ManageStock])
        .await?;

    let analysis = StatisticsService::new(&state.db)
        .stock_level_analysis()
        .await?;

    Ok(data(analysis.into_dto()))
}
