use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    model::{
        api::{DataDto, ErrorDto, MessageDto, PaginatedDto, StatusMessageDto},
        warehouse::{CreateWarehouseDto, UpdateWarehouseDto, WarehouseDto},
    },
    server::{
        controller::{data, message, status_message},
        error::AppError,
        middleware::auth::{AuthGuard, BearerToken, Permission},
        model::{
            pagination::Pagination,
            warehouse::{CreateWarehouseParams, UpdateWarehouseParams},
        },
        service::warehouse::WarehouseService,
        state::AppState,
    },
};

pub static WAREHOUSE_TAG: &str = "warehouse";

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct WarehouseQuery {
    pub is_active: Option<bool>,
    pub page: Option<u64>,
    pub per_page: Option<u64>,
}

#[utoipa::path(
    get,
    path = "/api/warehouses",
    tag = WAREHOUSE_TAG,
    params(WarehouseQuery),
    responses(
        (status = 200, description = "Page of warehouses", body = PaginatedDto<WarehouseDto>),
        (status = 401, description = "Not authenticated", body = ErrorDto)
    ),
    security(("bearer_auth" = [])),
)]
pub async fn get_warehouses(
    State(state): State<AppState>,
    token: BearerToken,
    Query(query): Query<WarehouseQuery>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[])
        .await?;

    let page = WarehouseService::new(&state.db)
        .get_paginated(query.is_active, Pagination::new(query.page, query.per_page))
        .await?;

    Ok(Json(page.into_dto(|w| w.into_dto())))
}

#[utoipa::path(
    get,
    path = "/api/warehouses/{id}",
    tag = WAREHOUSE_TAG,
    params(("id" = i32, Path, description = "Warehouse ID")),
    responses(
        (status = 200, description = "Warehouse", body = DataDto<WarehouseDto>),
        (status = 404, description = "Warehouse not found", body = ErrorDto)
    ),
    security(("bearer_auth" = [])),
)]
pub async fn get_warehouse(
    State(state): State<AppState>,
    token: BearerToken,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[])
        .await?;

    let warehouse = WarehouseService::new(&state.db).get_by_id(id).await?;

    Ok(data(warehouse.into_dto()))
}

#[utoipa::path(
    post,
    path = "/api/warehouses",
    tag = WAREHOUSE_TAG,
    request_body = CreateWarehouseDto,
    responses(
        (status = 201, description = "Warehouse created", body = MessageDto<WarehouseDto>),
        (status = 400, description = "Invalid data or duplicate code", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto)
    ),
    security(("bearer_auth" = [])),
)]
pub async fn create_warehouse(
    State(state): State<AppState>,
    token: BearerToken,
    Json(payload): Json<CreateWarehouseDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[Permission::Admin])
        .await?;

    let warehouse = WarehouseService::new(&state.db)
        .create(CreateWarehouseParams::from_dto(payload))
        .await?;

    Ok((
        StatusCode::CREATED,
        message("Warehouse created successfully", warehouse.into_dto()),
    ))
}

#[utoipa::path(
    put,
    path = "/api/warehouses/{id}",
    tag = WAREHOUSE_TAG,
    params(("id" = i32, Path, description = "Warehouse ID")),
    request_body = UpdateWarehouseDto,
    responses(
        (status = 200, description = "Warehouse updated", body = MessageDto<WarehouseDto>),
        (status = 400, description = "Invalid data or duplicate code", body = ErrorDto),
        (status = 404, description = "Warehouse not found", body = ErrorDto)
    ),
    security(("bearer_auth" = [])),
)]
pub async fn update_warehouse(
    State(state): State<AppState>,
    token: BearerToken,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateWarehouseDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[Permission::Admin])
        .await?;

    let warehouse = WarehouseService::new(&state.db)
        .update(id, UpdateWarehouseParams::from_dto(payload))
        .await?;

    Ok(message("Warehouse updated successfully", warehouse.into_dto()))
}

#[utoipa::path(
    delete,
    path = "/api/warehouses/{id}",
    tag = WAREHOUSE_TAG,
    params(("id" = i32, Path, description = "Warehouse ID")),
    responses(
        (status = 200, description = "Warehouse deleted", body = StatusMessageDto),
        (status = 404, description = "Warehouse not found", body = ErrorDto)
    ),
    security(("bearer_auth" = [])),
)]
pub async fn delete_warehouse(
    State(state): State<AppState>,
    token: BearerToken,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[Permission::Admin])
        .await?;

    WarehouseService::new(&state.db).delete(id).await?;

    Ok(status_message("Warehouse deleted successfully"))
}
