use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::{ErrorDto, MessageDto, PaginatedDto, StatusMessageDto},
        institution::{CreateInstitutionDto, InstitutionDto, UpdateInstitutionDto},
    },
    server::{
        controller::{message, status_message, PageQuery},
        error::AppError,
        middleware::auth::{AuthGuard, BearerToken, Permission},
        model::institution::{CreateInstitutionParams, UpdateInstitutionParams},
        service::institution::InstitutionService,
        state::AppState,
    },
};

pub static INSTITUTION_TAG: &str = "institution";

#[utoipa::path(
    get,
    path = "/api/institutions",
    tag = INSTITUTION_TAG,
    params(PageQuery),
    responses(
        (status = 200, description = "Page of institutions", body = PaginatedDto<InstitutionDto>),
        (status = 401, description = "Not authenticated", body = ErrorDto)
    ),
    security(("bearer_auth" = [])),
)]
pub async fn get_institutions(
    State(state): State<AppState>,
    token: BearerToken,
    Query(query): Query<PageQuery>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[])
        .await?;

    let page = InstitutionService::new(&state.db)
        .get_paginated(query.pagination())
        .await?;

    Ok(Json(page.into_dto(|i| i.into_dto())))
}

#[utoipa::path(
    post,
    path = "/api/institutions",
    tag = INSTITUTION_TAG,
    request_body = CreateInstitutionDto,
    responses(
        (status = 201, description = "Institution created", body = MessageDto<InstitutionDto>),
        (status = 400, description = "Invalid data or duplicate code", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto)
    ),
    security(("bearer_auth" = [])),
)]
pub async fn create_institution(
    State(state): State<AppState>,
    token: BearerToken,
    Json(payload): Json<CreateInstitutionDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[Permission::Admin])
        .await?;

    let institution = InstitutionService::new(&state.db)
        .create(CreateInstitutionParams::from_dto(payload))
        .await?;

    Ok((
        StatusCode::CREATED,
        message("Institution created successfully", institution.into_dto()),
    ))
}

#[utoipa::path(
    put,
    path = "/api/institutions/{id}",
    tag = INSTITUTION_TAG,
    params(("id" = i32, Path, description = "Institution ID")),
    request_body = UpdateInstitutionDto,
    responses(
        (status = 200, description = "Institution updated", body = MessageDto<InstitutionDto>),
        (status = 400, description = "Invalid data or duplicate code", body = ErrorDto),
        (status = 404, description = "Institution not found", body = ErrorDto)
    ),
    security(("bearer_auth" = [])),
)]
pub async fn update_institution(
    State(state): State<AppState>,
    token: BearerToken,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateInstitutionDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[Permission::Admin])
        .await?;

    let institution = InstitutionService::new(&state.db)
        .update(id, UpdateInstitutionParams::from_dto(payload))
        .await?;

    Ok(message("Institution updated successfully", institution.into_dto()))
}

#[utoipa::path(
    delete,
    path = "/api/institutions/{id}",
    tag = INSTITUTION_TAG,
    params(("id" = i32, Path, description = "Institution ID")),
    responses(
        (status = 200, description = "Institution deleted", body = StatusMessageDto),
        (status = 400, description = "Institution is referenced by inventory items", body = ErrorDto),
        (status = 404, description = "Institution not found", body = ErrorDto)
    ),
    security(("bearer_auth" = [])),
)]
pub async fn delete_institution(
    State(state): State<AppState>,
    token: BearerToken,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[Permission::Admin])
        .await?;

    InstitutionService::new(&state.db).delete(id).await?;

    Ok(status_message("Institution deleted successfully"))
}
