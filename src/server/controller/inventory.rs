//! Warehouse inventory: summary rows, tracked items with their audit trail, and
//! project reserves.

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
        api::{DataDto, ErrorDto, MessageDto, PaginatedDto},
        inventory::{
            CreateInventoryDto, CreateInventoryItemDto, CreateInventoryReserveDto, InventoryDto,
            InventoryItemDto, InventoryReserveDto, InventoryTransactionDto,
            UpdateQuantityDto, UpdateReserveStatusDto,
        },
    },
    server::{
        controller::{data, message, PageQuery},
        error::AppError,
        middleware::auth::{AuthGuard, BearerToken, Permission},
        model::{
            inventory::{
                CreateInventoryItemParams, CreateInventoryParams, CreateReserveParams,
                InventoryTransactionFilter, QuantityAdjustment,
            },
            pagination::Pagination,
        },
        service::inventory::{
            InventoryItemService, InventoryReserveService, InventoryService,
            InventoryTransactionService,
        },
        state::AppState,
    },
};
use entity::enums::{MovementKind, ReserveStatus};

pub static INVENTORY_TAG: &str = "inventory";

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct InventoryItemQuery {
    /// Matches material code or name
    pub search: Option<String>,
    pub page: Option<u64>,
    pub per_page: Option<u64>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ReserveQuery {
    pub status: Option<ReserveStatus>,
    pub page: Option<u64>,
    pub per_page: Option<u64>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TransactionQuery {
    pub inventory_item_id: Option<i32>,
    pub material_id: Option<i32>,
    pub warehouse_id: Option<i32>,
    pub kind: Option<MovementKind>,
    pub page: Option<u64>,
    pub per_page: Option<u64>,
}

#[utoipa::path(
    get,
    path = "/api/inventory",
    tag = INVENTORY_TAG,
    params(PageQuery),
    responses(
        (status = 200, description = "Page of inventory rows", body = PaginatedDto<InventoryDto>),
        (status = 403, description = "Admin only", body = ErrorDto)
    ),
    security(("bearer_auth" = [])),
)]
pub async fn get_inventory(
    State(state): State<AppState>,
    token: BearerToken,
    Query(query): Query<PageQuery>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[Permission::Admin])
        .await?;

    let page = InventoryService::new(&state.db)
        .get_paginated(query.pagination())
        .await?;

    Ok(Json(page.into_dto(|i| i.into_dto())))
}

#[utoipa::path(
    post,
    path = "/api/inventory",
    tag = INVENTORY_TAG,
    request_body = CreateInventoryDto,
    responses(
        (status = 201, description = "Inventory row created", body = MessageDto<InventoryDto>),
        (status = 400, description = "Negative quantity", body = ErrorDto),
        (status = 404, description = "Material or warehouse not found", body = ErrorDto)
    ),
    security(("bearer_auth" = [])),
)]
pub async fn create_inventory(
    State(state): State<AppState>,
    token: BearerToken,
    Json(payload): Json<CreateInventoryDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[Permission::Admin])
        .await?;

    let inventory = InventoryService::new(&state.db)
        .create(CreateInventoryParams::from_dto(payload))
        .await?;

    Ok((
        StatusCode::CREATED,
        message("Inventory created successfully", inventory.into_dto()),
    ))
}

#[utoipa::path(
    get,
    path = "/api/inventory-items",
    tag = INVENTORY_TAG,
    params(InventoryItemQuery),
    responses(
        (status = 200, description = "Page of inventory items", body = PaginatedDto<InventoryItemDto>),
        (status = 403, description = "Insufficient permissions", body = ErrorDto)
    ),
    security(("bearer_auth" = [])),
)]
pub async fn get_inventory_items(
    State(state): State<AppState>,
    token: BearerToken,
    Query(query): Query<InventoryItemQuery>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[Permission::ManageStock])
        .await?;

    let page = InventoryItemService::new(&state.db)
        .get_paginated(
            query.search.as_deref(),
            Pagination::new(query.page, query.per_page),
        )
        .await?;

    Ok(Json(page.into_dto(|i| i.into_dto())))
}

#[utoipa::path(
    get,
    path = "/api/inventory-items/{id}",
    tag = INVENTORY_TAG,
    params(("id" = i32, Path, description = "Inventory item ID")),
    responses(
        (status = 200, description = "Inventory item", body = DataDto<InventoryItemDto>),
        (status = 404, description = "Inventory item not found", body = ErrorDto)
    ),
    security(("bearer_auth" = [])),
)]
pub async fn get_inventory_item(
    State(state): State<AppState>,
    token: BearerToken,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[Permission::ManageStock])
        .await?;

    let item = InventoryItemService::new(&state.db).get_by_id(id).await?;

    Ok(data(item.into_dto()))
}

#[utoipa::path(
    post,
    path = "/api/inventory-items",
    tag = INVENTORY_TAG,
    request_body = CreateInventoryItemDto,
    responses(
        (status = 201, description = "Inventory item created", body = MessageDto<InventoryItemDto>),
        (status = 400, description = "Invalid quantities", body = ErrorDto),
        (status = 404, description = "Material, warehouse or institution not found", body = ErrorDto)
    ),
    security(("bearer_auth" = [])),
)]
pub async fn create_inventory_item(
    State(state): State<AppState>,
    token: BearerToken,
    Json(payload): Json<CreateInventoryItemDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[Permission::ManageStock])
        .await?;

    let item = InventoryItemService::new(&state.db)
        .create(CreateInventoryItemParams::from_dto(payload))
        .await?;

    Ok((
        StatusCode::CREATED,
        message("Inventory item created successfully", item.into_dto()),
    ))
}

/// Adjust an inventory item's quantity.
///
/// `operation` is one of `increase`, `decrease` or `set` (default). The change and an
/// audit transaction are written together; if the quantity changed since it was read
/// the whole update is abandoned.
///
/// # Access Control
/// - `Admin`, `Warehouse`
///
/// # Returns
/// - `200 OK` - The item after the change
/// - `400 Bad Request` - Resulting quantity negative or not a number
/// - `404 Not Found` - Item does not exist
/// - `409 Conflict` - Quantity modified concurrently
#[utoipa::path(
    patch,
    path = "/api/inventory-items/{id}/quantity",
    tag = INVENTORY_TAG,
    params(("id" = i32, Path, description = "Inventory item ID")),
    request_body = UpdateQuantityDto,
    responses(
        (status = 200, description = "Quantity updated", body = DataDto<InventoryItemDto>),
        (status = 400, description = "Invalid quantity", body = ErrorDto),
        (status = 404, description = "Inventory item not found", body = ErrorDto),
        (status = 409, description = "Quantity modified concurrently", body = ErrorDto)
    ),
    security(("bearer_auth" = [])),
)]
pub async fn update_item_quantity(
    State(state): State<AppState>,
    token: BearerToken,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateQuantityDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[Permission::ManageStock])
        .await?;

    let adjustment = QuantityAdjustment {
        quantity: payload.quantity,
        operation: payload.operation,
        note: payload.note,
    };

    let item = InventoryItemService::new(&state.db)
        .update_quantity(user.id, id, adjustment)
        .await?;

    Ok(data(item.into_dto()))
}

#[utoipa::path(
    get,
    path = "/api/inventory-items/{id}/transactions",
    tag = INVENTORY_TAG,
    params(("id" = i32, Path, description = "Inventory item ID"), PageQuery),
    responses(
        (status = 200, description = "Item audit trail, newest first", body = PaginatedDto<InventoryTransactionDto>),
        (status = 404, description = "Inventory item not found", body = ErrorDto)
    ),
    security(("bearer_auth" = [])),
)]
pub async fn get_item_transactions(
    State(state): State<AppState>,
    token: BearerToken,
    Path(id): Path<i32>,
    Query(query): Query<PageQuery>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[Permission::ManageStock])
        .await?;

    let page = InventoryItemService::new(&state.db)
        .get_transactions(id, query.pagination())
        .await?;

    Ok(Json(page.into_dto(|t| t.into_dto())))
}

#[utoipa::path(
    get,
    path = "/api/inventory-reserves",
    tag = INVENTORY_TAG,
    params(ReserveQuery),
    responses(
        (status = 200, description = "Page of reserves", body = PaginatedDto<InventoryReserveDto>),
        (status = 403, description = "Admin only", body = ErrorDto)
    ),
    security(("bearer_auth" = [])),
)]
pub async fn get_reserves(
    State(state): State<AppState>,
    token: BearerToken,
    Query(query): Query<ReserveQuery>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[Permission::Admin])
        .await?;

    let page = InventoryReserveService::new(&state.db)
        .get_paginated(query.status, Pagination::new(query.page, query.per_page))
        .await?;

    Ok(Json(page.into_dto(|r| r.into_dto())))
}

/// Reserve part of an item's free quantity for a project.
///
/// # Returns
/// - `201 Created` - The active reserve
/// - `400 Bad Request` - Quantity not above zero or more than is free
/// - `404 Not Found` - Item or project does not exist
/// - `409 Conflict` - Item levels modified concurrently
#[utoipa::path(
    post,
    path = "/api/inventory-reserves",
    tag = INVENTORY_TAG,
    request_body = CreateInventoryReserveDto,
    responses(
        (status = 201, description = "Reserve created", body = MessageDto<InventoryReserveDto>),
        (status = 400, description = "Insufficient available quantity", body = ErrorDto),
        (status = 404, description = "Item or project not found", body = ErrorDto),
        (status = 409, description = "Item modified concurrently", body = ErrorDto)
    ),
    security(("bearer_auth" = [])),
)]
pub async fn create_reserve(
    State(state): State<AppState>,
    token: BearerToken,
    Json(payload): Json<CreateInventoryReserveDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[Permission::ManageStock])
        .await?;

    let params = CreateReserveParams {
        inventory_item_id: payload.inventory_item_id,
        project_id: payload.project_id,
        quantity: payload.quantity,
    };

    let reserve = InventoryReserveService::new(&state.db).create(params).await?;

    Ok((
        StatusCode::CREATED,
        message("Reserve created successfully", reserve.into_dto()),
    ))
}

#[utoipa::path(
    patch,
    path = "/api/inventory-reserves/{id}/status",
    tag = INVENTORY_TAG,
    params(("id" = i32, Path, description = "Reserve ID")),
    request_body = UpdateReserveStatusDto,
    responses(
        (status = 200, description = "Reserve completed or cancelled", body = MessageDto<InventoryReserveDto>),
        (status = 400, description = "Reserve not active or invalid status", body = ErrorDto),
        (status = 404, description = "Reserve not found", body = ErrorDto),
        (status = 409, description = "Reserve or item modified concurrently", body = ErrorDto)
    ),
    security(("bearer_auth" = [])),
)]
pub async fn update_reserve_status(
    State(state): State<AppState>,
    token: BearerToken,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateReserveStatusDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[Permission::ManageStock])
        .await?;

    let reserve = InventoryReserveService::new(&state.db)
        .update_status(user.id, id, payload.status)
        .await?;

    Ok(message("Reserve status updated", reserve.into_dto()))
}

#[utoipa::path(
    get,
    path = "/api/inventory-transactions",
    tag = INVENTORY_TAG,
    params(TransactionQuery),
    responses(
        (status = 200, description = "Page of inventory transactions", body = PaginatedDto<InventoryTransactionDto>),
        (status = 403, description = "Admin only", body = ErrorDto)
    ),
    security(("bearer_auth" = [])),
)]
pub async fn get_transactions(
    State(state): State<AppState>,
    token: BearerToken,
    Query(query): Query<TransactionQuery>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[Permission::Admin])
        .await?;

    let filter = InventoryTransactionFilter {
        inventory_item_id: query.inventory_item_id,
        material_id: query.material_id,
        warehouse_id: query.warehouse_id,
        kind: query.kind,
    };

    let page = InventoryTransactionService::new(&state.db)
        .get_paginated(&filter, Pagination::new(query.page, query.per_page))
        .await?;

    Ok(Json(page.into_dto(|t| t.into_dto())))
}
