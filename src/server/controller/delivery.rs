use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    model::{
        api::{ErrorDto, MessageDto, PaginatedDto},
        delivery::{CompleteDeliveryDto, DeliveryDto, UpdateDeliveryStatusDto},
    },
    server::{
        controller::message,
        error::AppError,
        middleware::auth::{AuthGuard, BearerToken, Permission},
        model::pagination::Pagination,
        service::delivery::DeliveryService,
        state::AppState,
    },
};
use entity::enums::DeliveryStatus;

pub static DELIVERY_TAG: &str = "delivery";

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DeliveryQuery {
    pub status: Option<DeliveryStatus>,
    pub page: Option<u64>,
    pub per_page: Option<u64>,
}

#[utoipa::path(
    get,
    path = "/api/deliveries",
    tag = DELIVERY_TAG,
    params(DeliveryQuery),
    responses(
        (status = 200, description = "Page of deliveries", body = PaginatedDto<DeliveryDto>),
        (status = 401, description = "Not authenticated", body = ErrorDto)
    ),
    security(("bearer_auth" = [])),
)]
pub async fn get_deliveries(
    State(state): State<AppState>,
    token: BearerToken,
    Query(query): Query<DeliveryQuery>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[])
        .await?;

    let page = DeliveryService::new(&state.db)
        .get_paginated(query.status, Pagination::new(query.page, query.per_page))
        .await?;

    Ok(Json(page.into_dto(|d| d.into_dto())))
}

/// Complete delivery of an approved request.
///
/// Deducts the effective quantity from the material's stock, records an outgoing stock
/// movement, creates the delivery and marks the request delivered, all in one
/// transaction.
///
/// # Access Control
/// - `Admin`, `Warehouse`
///
/// # Returns
/// - `200 OK` - The completed delivery
/// - `400 Bad Request` - Request not approved, already delivered or insufficient stock
/// - `404 Not Found` - Request does not exist
/// - `409 Conflict` - Material stock changed concurrently
#[utoipa::path(
    post,
    path = "/api/deliveries/{request_id}/complete",
    tag = DELIVERY_TAG,
    params(("request_id" = i32, Path, description = "Request ID")),
    request_body(content = CompleteDeliveryDto, description = "Optional receiver"),
    responses(
        (status = 200, description = "Delivery completed", body = MessageDto<DeliveryDto>),
        (status = 400, description = "Request cannot be delivered", body = ErrorDto),
        (status = 404, description = "Request not found", body = ErrorDto),
        (status = 409, description = "Stock modified concurrently", body = ErrorDto)
    ),
    security(("bearer_auth" = [])),
)]
pub async fn complete_delivery(
    State(state): State<AppState>,
    token: BearerToken,
    Path(request_id): Path<i32>,
    payload: Option<Json<CompleteDeliveryDto>>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[Permission::ManageStock])
        .await?;

    let received_by = payload.and_then(|Json(dto)| dto.received_by);

    let completed = DeliveryService::new(&state.db)
        .complete(user.id, request_id, received_by)
        .await?;

    Ok(message(
        "Delivery completed successfully",
        completed.delivery.into_dto(),
    ))
}

#[utoipa::path(
    patch,
    path = "/api/deliveries/{id}/status",
    tag = DELIVERY_TAG,
    params(("id" = i32, Path, description = "Delivery ID")),
    request_body = UpdateDeliveryStatusDto,
    responses(
        (status = 200, description = "Status updated", body = MessageDto<DeliveryDto>),
        (status = 404, description = "Delivery not found", body = ErrorDto)
    ),
    security(("bearer_auth" = [])),
)]
pub async fn update_delivery_status(
    State(state): State<AppState>,
    token: BearerToken,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateDeliveryStatusDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[Permission::ManageStock])
        .await?;

    let delivery = DeliveryService::new(&state.db)
        .update_status(id, payload.status)
        .await?;

    Ok(message("Delivery status updated", delivery.into_dto()))
}
