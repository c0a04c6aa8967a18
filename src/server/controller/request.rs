use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    model::{
        api::{DataDto, ErrorDto, MessageDto, PaginatedDto},
        request::{CreateRequestDto, RequestDto, UpdateRequestDto, UpdateRequestStatusDto},
    },
    server::{
        controller::{data, message},
        error::AppError,
        middleware::auth::{AuthGuard, BearerToken, Permission},
        model::{
            pagination::Pagination,
            request::{CreateRequestParams, RequestFilter, UpdateRequestParams},
        },
        service::request::RequestService,
        state::AppState,
        util::sort::Sort,
    },
};
use entity::enums::RequestStatus;

/// Tag for grouping material request endpoints in OpenAPI documentation
pub static REQUEST_TAG: &str = "request";

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RequestQuery {
    pub status: Option<RequestStatus>,
    pub project_id: Option<i32>,
    pub material_id: Option<i32>,
    /// Created at or after (RFC 3339)
    pub start_date: Option<DateTime<Utc>>,
    /// Created at or before (RFC 3339)
    pub end_date: Option<DateTime<Utc>>,
    pub min_qty: Option<f64>,
    pub max_qty: Option<f64>,
    /// `field:dir` with field one of created_at, requested_qty, status
    pub sort: Option<String>,
    pub page: Option<u64>,
    pub per_page: Option<u64>,
}

impl RequestQuery {
    fn filter(self) -> Result<RequestFilter, AppError> {
        let default = RequestFilter::default();

        Ok(RequestFilter {
            sort: Sort::parse_or(self.sort.as_deref(), default.sort)?,
            status: self.status,
            project_id: self.project_id,
            material_id: self.material_id,
            start_date: self.start_date,
            end_date: self.end_date,
            min_qty: self.min_qty,
            max_qty: self.max_qty,
        })
    }
}

/// Raise a material request for a project.
///
/// The request starts as `pending` and is owned by the caller.
///
/// # Access Control
/// - `Admin`, `Engineer`, `Contractor`
///
/// # Returns
/// - `201 Created` - The new request
/// - `400 Bad Request` - Quantity not above zero
/// - `404 Not Found` - Project or material does not exist
#[utoipa::path(
    post,
    path = "/api/requests",
    tag = REQUEST_TAG,
    request_body = CreateRequestDto,
    responses(
        (status = 201, description = "Request created", body = MessageDto<RequestDto>),
        (status = 400, description = "Invalid quantity", body = ErrorDto),
        (status = 403, description = "Role may not raise requests", body = ErrorDto),
        (status = 404, description = "Project or material not found", body = ErrorDto)
    ),
    security(("bearer_auth" = [])),
)]
pub async fn create_request(
    State(state): State<AppState>,
    token: BearerToken,
    Json(payload): Json<CreateRequestDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[Permission::RaiseRequest])
        .await?;

    let request = RequestService::new(&state.db)
        .create(CreateRequestParams::from_dto(user.id, payload))
        .await?;

    Ok((
        StatusCode::CREATED,
        message("Request created successfully", request.into_dto()),
    ))
}

#[utoipa::path(
    get,
    path = "/api/requests",
    tag = REQUEST_TAG,
    params(RequestQuery),
    responses(
        (status = 200, description = "Page of requests", body = PaginatedDto<RequestDto>),
        (status = 400, description = "Invalid sort", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto)
    ),
    security(("bearer_auth" = [])),
)]
pub async fn get_requests(
    State(state): State<AppState>,
    token: BearerToken,
    Query(query): Query<RequestQuery>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[])
        .await?;

    let pagination = Pagination::new(query.page, query.per_page);
    let filter = query.filter()?;

    let page = RequestService::new(&state.db)
        .get_paginated(&filter, pagination)
        .await?;

    Ok(Json(page.into_dto(|r| r.into_dto())))
}

#[utoipa::path(
    get,
    path = "/api/requests/{id}",
    tag = REQUEST_TAG,
    params(("id" = i32, Path, description = "Request ID")),
    responses(
        (status = 200, description = "Request", body = DataDto<RequestDto>),
        (status = 404, description = "Request not found", body = ErrorDto)
    ),
    security(("bearer_auth" = [])),
)]
pub async fn get_request(
    State(state): State<AppState>,
    token: BearerToken,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[])
        .await?;

    let request = RequestService::new(&state.db).get_by_id(id).await?;

    Ok(data(request.into_dto()))
}

/// Edit a pending request's revised quantity or note.
#[utoipa::path(
    put,
    path = "/api/requests/{id}",
    tag = REQUEST_TAG,
    params(("id" = i32, Path, description = "Request ID")),
    request_body = UpdateRequestDto,
    responses(
        (status = 200, description = "Request updated", body = MessageDto<RequestDto>),
        (status = 400, description = "Request not pending or invalid revised quantity", body = ErrorDto),
        (status = 404, description = "Request not found", body = ErrorDto)
    ),
    security(("bearer_auth" = [])),
)]
pub async fn update_request(
    State(state): State<AppState>,
    token: BearerToken,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateRequestDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[Permission::Engineering])
        .await?;

    let request = RequestService::new(&state.db)
        .update(id, UpdateRequestParams::from_dto(payload))
        .await?;

    Ok(message("Request updated successfully", request.into_dto()))
}

/// Approve or reject a pending request.
///
/// # Access Control
/// - `Admin`, `Warehouse`
///
/// # Returns
/// - `200 OK` - Request with its new status; the requester is notified
/// - `400 Bad Request` - Request not pending, or status other than approved/rejected
/// - `404 Not Found` - Request does not exist
#[utoipa::path(
    patch,
    path = "/api/requests/{id}/status",
    tag = REQUEST_TAG,
    params(("id" = i32, Path, description = "Request ID")),
    request_body = UpdateRequestStatusDto,
    responses(
        (status = 200, description = "Status updated", body = MessageDto<RequestDto>),
        (status = 400, description = "Transition not allowed", body = ErrorDto),
        (status = 404, description = "Request not found", body = ErrorDto)
    ),
    security(("bearer_auth" = [])),
)]
pub async fn update_request_status(
    State(state): State<AppState>,
    token: BearerToken,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateRequestStatusDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[Permission::ManageStock])
        .await?;

    let request = RequestService::new(&state.db)
        .update_status(id, payload.status)
        .await?;

    Ok(message("Request status updated", request.into_dto()))
}
