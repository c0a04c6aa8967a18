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
        employee::{CreateEmployeeDto, EmployeeDto, UpdateEmployeeDto},
    },
    server::{
        controller::{data, message, status_message},
        error::AppError,
        middleware::auth::{AuthGuard, BearerToken, Permission},
        model::{
            employee::{CreateEmployeeParams, UpdateEmployeeParams},
            pagination::Pagination,
        },
        service::employee::EmployeeService,
        state::AppState,
    },
};

pub static EMPLOYEE_TAG: &str = "employee";

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct EmployeeQuery {
    /// Matches first or last name
    pub search: Option<String>,
    pub page: Option<u64>,
    pub per_page: Option<u64>,
}

#[utoipa::path(
    get,
    path = "/api/employees",
    tag = EMPLOYEE_TAG,
    params(EmployeeQuery),
    responses(
        (status = 200, description = "Page of employees", body = PaginatedDto<EmployeeDto>),
        (status = 403, description = "Not an admin", body = ErrorDto)
    ),
    security(("bearer_auth" = [])),
)]
pub async fn get_employees(
    State(state): State<AppState>,
    token: BearerToken,
    Query(query): Query<EmployeeQuery>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[Permission::Admin])
        .await?;

    let page = EmployeeService::new(&state.db)
        .get_paginated(
            query.search.as_deref().filter(|s| !s.trim().is_empty()),
            Pagination::new(query.page, query.per_page),
        )
        .await?;

    Ok(Json(page.into_dto(|e| e.into_dto())))
}

#[utoipa::path(
    get,
    path = "/api/employees/{id}",
    tag = EMPLOYEE_TAG,
    params(("id" = i32, Path, description = "Employee ID")),
    responses(
        (status = 200, description = "Employee", body = DataDto<EmployeeDto>),
        (status = 404, description = "Employee not found", body = ErrorDto)
    ),
    security(("bearer_auth" = [])),
)]
pub async fn get_employee(
    State(state): State<AppState>,
    token: BearerToken,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[Permission::Admin])
        .await?;

    let employee = EmployeeService::new(&state.db).get_by_id(id).await?;

    Ok(data(employee.into_dto()))
}

/// Create an employee. `role_id` must name a role of kind `employee`.
#[utoipa::path(
    post,
    path = "/api/employees",
    tag = EMPLOYEE_TAG,
    request_body = CreateEmployeeDto,
    responses(
        (status = 201, description = "Employee created", body = MessageDto<EmployeeDto>),
        (status = 400, description = "Invalid employee data", body = ErrorDto)
    ),
    security(("bearer_auth" = [])),
)]
pub async fn create_employee(
    State(state): State<AppState>,
    token: BearerToken,
    Json(payload): Json<CreateEmployeeDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[Permission::Admin])
        .await?;

    let employee = EmployeeService::new(&state.db)
        .create(CreateEmployeeParams::from_dto(payload))
        .await?;

    Ok((
        StatusCode::CREATED,
        message("Employee created successfully", employee.into_dto()),
    ))
}

#[utoipa::path(
    put,
    path = "/api/employees/{id}",
    tag = EMPLOYEE_TAG,
    params(("id" = i32, Path, description = "Employee ID")),
    request_body = UpdateEmployeeDto,
    responses(
        (status = 200, description = "Employee updated", body = MessageDto<EmployeeDto>),
        (status = 400, description = "Invalid employee data", body = ErrorDto),
        (status = 404, description = "Employee not found", body = ErrorDto)
    ),
    security(("bearer_auth" = [])),
)]
pub async fn update_employee(
    State(state): State<AppState>,
    token: BearerToken,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateEmployeeDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[Permission::Admin])
        .await?;

    let employee = EmployeeService::new(&state.db)
        .update(id, UpdateEmployeeParams::from_dto(payload))
        .await?;

    Ok(message("Employee updated successfully", employee.into_dto()))
}

#[utoipa::path(
    delete,
    path = "/api/employees/{id}",
    tag = EMPLOYEE_TAG,
    params(("id" = i32, Path, description = "Employee ID")),
    responses(
        (status = 200, description = "Employee deleted", body = StatusMessageDto),
        (status = 404, description = "Employee not found", body = ErrorDto)
    ),
    security(("bearer_auth" = [])),
)]
pub async fn delete_employee(
    State(state): State<AppState>,
    token: BearerToken,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[Permission::Admin])
        .await?;

    EmployeeService::new(&state.db).delete(id).await?;

    Ok(status_message("Employee deleted successfully"))
}
