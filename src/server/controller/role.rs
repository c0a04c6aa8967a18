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
        role::{CreateRoleDto, RoleDto, UpdateRoleDto},
    },
    server::{
        controller::{data, message, status_message},
        error::AppError,
        middleware::auth::{AuthGuard, BearerToken, Permission},
        model::{
            pagination::Pagination,
            role::{CreateRoleParams, UpdateRoleParams},
        },
        service::role::RoleService,
        state::AppState,
    },
};
use entity::enums::RoleKind;

pub static ROLE_TAG: &str = "role";

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RoleQuery {
    /// Only roles of this kind
    pub kind: Option<RoleKind>,
    pub page: Option<u64>,
    pub per_page: Option<u64>,
}

#[utoipa::path(
    get,
    path = "/api/roles",
    tag = ROLE_TAG,
    params(RoleQuery),
    responses(
        (status = 200, description = "Page of roles", body = PaginatedDto<RoleDto>),
        (status = 403, description = "Not an admin", body = ErrorDto)
    ),
    security(("bearer_auth" = [])),
)]
pub async fn get_roles(
    State(state): State<AppState>,
    token: BearerToken,
    Query(query): Query<RoleQuery>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[Permission::Admin])
        .await?;

    let page = RoleService::new(&state.db)
        .get_paginated(query.kind, Pagination::new(query.page, query.per_page))
        .await?;

    Ok(Json(page.into_dto(|r| r.into_dto())))
}

#[utoipa::path(
    get,
    path = "/api/roles/{id}",
    tag = ROLE_TAG,
    params(("id" = i32, Path, description = "Role ID")),
    responses(
        (status = 200, description = "Role", body = DataDto<RoleDto>),
        (status = 404, description = "Role not found", body = ErrorDto)
    ),
    security(("bearer_auth" = [])),
)]
pub async fn get_role(
    State(state): State<AppState>,
    token: BearerToken,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[Permission::Admin])
        .await?;

    let role = RoleService::new(&state.db).get_by_id(id).await?;

    Ok(data(role.into_dto()))
}

#[utoipa::path(
    post,
    path = "/api/roles",
    tag = ROLE_TAG,
    request_body = CreateRoleDto,
    responses(
        (status = 201, description = "Role created", body = MessageDto<RoleDto>),
        (status = 400, description = "Invalid role data", body = ErrorDto)
    ),
    security(("bearer_auth" = [])),
)]
pub async fn create_role(
    State(state): State<AppState>,
    token: BearerToken,
    Json(payload): Json<CreateRoleDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[Permission::Admin])
        .await?;

    let role = RoleService::new(&state.db)
        .create(CreateRoleParams::from_dto(payload))
        .await?;

    Ok((
        StatusCode::CREATED,
        message("Role created successfully", role.into_dto()),
    ))
}

/// Update a role. System roles are rejected with 400.
#[utoipa::path(
    put,
    path = "/api/roles/{id}",
    tag = ROLE_TAG,
    params(("id" = i32, Path, description = "Role ID")),
    request_body = UpdateRoleDto,
    responses(
        (status = 200, description = "Role updated", body = MessageDto<RoleDto>),
        (status = 400, description = "Invalid data or system role", body = ErrorDto),
        (status = 404, description = "Role not found", body = ErrorDto)
    ),
    security(("bearer_auth" = [])),
)]
pub async fn update_role(
    State(state): State<AppState>,
    token: BearerToken,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateRoleDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[Permission::Admin])
        .await?;

    let role = RoleService::new(&state.db)
        .update(id, UpdateRoleParams::from_dto(payload))
        .await?;

    Ok(message("Role updated successfully", role.into_dto()))
}

/// Soft delete a role that is not a system role and not held by any employee.
#[utoipa::path(
    delete,
    path = "/api/roles/{id}",
    tag = ROLE_TAG,
    params(("id" = i32, Path, description = "Role ID")),
    responses(
        (status = 200, description = "Role deleted", body = StatusMessageDto),
        (status = 400, description = "System role or role in use", body = ErrorDto),
        (status = 404, description = "Role not found", body = ErrorDto)
    ),
    security(("bearer_auth" = [])),
)]
pub async fn delete_role(
    State(state): State<AppState>,
    token: BearerToken,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[Permission::Admin])
        .await?;

    RoleService::new(&state.db).delete(id).await?;

    Ok(status_message("Role deleted successfully"))
}
