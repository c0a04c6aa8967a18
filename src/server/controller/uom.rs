use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::{ErrorDto, MessageDto, PaginatedDto},
        uom::{CreateUomDto, UomDto},
    },
    server::{
        controller::{message, PageQuery},
        error::AppError,
        middleware::auth::{AuthGuard, BearerToken, Permission},
        service::uom::UomService,
        state::AppState,
    },
};

pub static UOM_TAG: &str = "uom";

#[utoipa::path(
    get,
    path = "/api/uoms",
    tag = UOM_TAG,
    params(PageQuery),
    responses(
        (status = 200, description = "Page of units of measure", body = PaginatedDto<UomDto>),
        (status = 401, description = "Not authenticated", body = ErrorDto)
    ),
    security(("bearer_auth" = [])),
)]
pub async fn get_uoms(
    State(state): State<AppState>,
    token: BearerToken,
    Query(query): Query<PageQuery>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[])
        .await?;

    let page = UomService::new(&state.db)
        .get_paginated(query.pagination())
        .await?;

    Ok(Json(page.into_dto(|u| u.into_dto())))
}

/// Create a unit of measure. Symbols must be unique.
#[utoipa::path(
    post,
    path = "/api/uoms",
    tag = UOM_TAG,
    request_body = CreateUomDto,
    responses(
        (status = 201, description = "Unit created", body = MessageDto<UomDto>),
        (status = 400, description = "Invalid data or duplicate symbol", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto)
    ),
    security(("bearer_auth" = [])),
)]
pub async fn create_uom(
    State(state): State<AppState>,
    token: BearerToken,
    Json(payload): Json<CreateUomDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[Permission::Admin])
        .await?;

    let uom = UomService::new(&state.db)
        .create(payload.name, payload.symbol)
        .await?;

    Ok((
        StatusCode::CREATED,
        message("Unit of measure created successfully", uom.into_dto()),
    ))
}
