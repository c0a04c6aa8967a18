use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    model::{
        api::{ErrorDto, PaginatedDto},
        stock_movement::StockMovementDto,
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, BearerToken, Permission},
        model::{pagination::Pagination, stock_movement::StockMovementFilter},
        service::stock_movement::StockMovementService,
        state::AppState,
    },
};
use entity::enums::MovementKind;

pub static STOCK_MOVEMENT_TAG: &str = "stock_movement";

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StockMovementQuery {
    pub material_id: Option<i32>,
    pub kind: Option<MovementKind>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub page: Option<u64>,
    pub per_page: Option<u64>,
}

/// Material stock ledger, newest first.
#[utoipa::path(
    get,
    path = "/api/stock-movements",
    tag = STOCK_MOVEMENT_TAG,
    params(StockMovementQuery),
    responses(
        (status = 200, description = "Page of stock movements", body = PaginatedDto<StockMovementDto>),
        (status = 403, description = "Insufficient permissions", body = ErrorDto)
    ),
    security(("bearer_auth" = [])),
)]
pub async fn get_stock_movements(
    State(state): State<AppState>,
    token: BearerToken,
    Query(query): Query<StockMovementQuery>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[Permission::ManageStock])
        .await?;

    let filter = StockMovementFilter {
        material_id: query.material_id,
        kind: query.kind,
        start_date: query.start_date,
        end_date: query.end_date,
    };

    let page = StockMovementService::new(&state.db)
        .get_paginated(&filter, Pagination::new(query.page, query.per_page))
        .await?;

    Ok(Json(page.into_dto(|m| m.into_dto())))
}
