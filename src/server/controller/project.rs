use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::{DataDto, ErrorDto, MessageDto, PaginatedDto, StatusMessageDto},
        project::{
            AddProjectEmployeeDto, AddProjectUserDto, CreateProjectDto, ProjectDto,
            ProjectEmployeeDto, ProjectUserDto, UpdateProjectDto,
        },
    },
    server::{
        controller::{data, message, status_message, PageQuery},
        error::AppError,
        middleware::auth::{AuthGuard, BearerToken, Permission},
        model::project::{CreateProjectParams, UpdateProjectParams},
        service::project::ProjectService,
        state::AppState,
    },
};

/// Tag for grouping project endpoints in OpenAPI documentation
pub static PROJECT_TAG: &str = "project";

/// List projects, newest first, with their engineer and contractor counts.
///
/// # Access Control
/// - Any authenticated user
#[utoipa::path(
    get,
    path = "/api/projects",
    tag = PROJECT_TAG,
    params(PageQuery),
    responses(
        (status = 200, description = "Page of projects", body = PaginatedDto<ProjectDto>),
        (status = 401, description = "Not authenticated", body = ErrorDto)
    ),
    security(("bearer_auth" = [])),
)]
pub async fn get_projects(
    State(state): State<AppState>,
    token: BearerToken,
    Query(query): Query<PageQuery>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[])
        .await?;

    let page = ProjectService::new(&state.db)
        .get_paginated(query.pagination())
        .await?;

    Ok(Json(page.into_dto(|p| p.into_dto())))
}

#[utoipa::path(
    get,
    path = "/api/projects/{id}",
    tag = PROJECT_TAG,
    params(("id" = i32, Path, description = "Project ID")),
    responses(
        (status = 200, description = "Project", body = DataDto<ProjectDto>),
        (status = 404, description = "Project not found", body = ErrorDto)
    ),
    security(("bearer_auth" = [])),
)]
pub async fn get_project(
    State(state): State<AppState>,
    token: BearerToken,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[])
        .await?;

    let project = ProjectService::new(&state.db).get_by_id(id).await?;

    Ok(data(project.into_dto()))
}

#[utoipa::path(
    post,
    path = "/api/projects",
    tag = PROJECT_TAG,
    request_body = CreateProjectDto,
    responses(
        (status = 201, description = "Project created", body = MessageDto<ProjectDto>),
        (status = 400, description = "Invalid project data", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto)
    ),
    security(("bearer_auth" = [])),
)]
pub async fn create_project(
    State(state): State<AppState>,
    token: BearerToken,
    Json(payload): Json<CreateProjectDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[Permission::Admin])
        .await?;

    let project = ProjectService::new(&state.db)
        .create(CreateProjectParams::from_dto(payload))
        .await?;

    Ok((
        StatusCode::CREATED,
        message("Project created successfully", project.into_dto()),
    ))
}

#[utoipa::path(
    put,
    path = "/api/projects/{id}",
    tag = PROJECT_TAG,
    params(("id" = i32, Path, description = "Project ID")),
    request_body = UpdateProjectDto,
    responses(
        (status = 200, description = "Project updated", body = MessageDto<ProjectDto>),
        (status = 400, description = "Invalid project data", body = ErrorDto),
        (status = 404, description = "Project not found", body = ErrorDto)
    ),
    security(("bearer_auth" = [])),
)]
pub async fn update_project(
    State(state): State<AppState>,
    token: BearerToken,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateProjectDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[Permission::Admin])
        .await?;

    let project = ProjectService::new(&state.db)
        .update(id, UpdateProjectParams::from_dto(payload))
        .await?;

    Ok(message("Project updated successfully", project.into_dto()))
}

#[utoipa::path(
    delete,
    path = "/api/projects/{id}",
    tag = PROJECT_TAG,
    params(("id" = i32, Path, description = "Project ID")),
    responses(
        (status = 200, description = "Project deleted", body = StatusMessageDto),
        (status = 404, description = "Project not found", body = ErrorDto)
    ),
    security(("bearer_auth" = [])),
)]
pub async fn delete_project(
    State(state): State<AppState>,
    token: BearerToken,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[Permission::Admin])
        .await?;

    ProjectService::new(&state.db).delete(id).await?;

    Ok(status_message("Project deleted successfully"))
}

#[utoipa::path(
    get,
    path = "/api/projects/{id}/users",
    tag = PROJECT_TAG,
    params(("id" = i32, Path, description = "Project ID")),
    responses(
        (status = 200, description = "Project members", body = DataDto<Vec<ProjectUserDto>>),
        (status = 404, description = "Project not found", body = ErrorDto)
    ),
    security(("bearer_auth" = [])),
)]
pub async fn get_project_users(
    State(state): State<AppState>,
    token: BearerToken,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[])
        .await?;

    let members = ProjectService::new(&state.db).get_users(id).await?;

    Ok(data(
        members
            .into_iter()
            .map(|m| m.into_dto())
            .collect::<Vec<_>>(),
    ))
}

/// Add a user to a project.
///
/// # Returns
/// - `201 Created` - The new membership
/// - `400 Bad Request` - User already assigned
/// - `404 Not Found` - Project or user does not exist
#[utoipa::path(
    post,
    path = "/api/projects/{id}/users",
    tag = PROJECT_TAG,
    params(("id" = i32, Path, description = "Project ID")),
    request_body = AddProjectUserDto,
    responses(
        (status = 201, description = "User assigned", body = MessageDto<ProjectUserDto>),
        (status = 400, description = "User already assigned", body = ErrorDto),
        (status = 404, description = "Project or user not found", body = ErrorDto)
    ),
    security(("bearer_auth" = [])),
)]
pub async fn add_project_user(
    State(state): State<AppState>,
    token: BearerToken,
    Path(id): Path<i32>,
    Json(payload): Json<AddProjectUserDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[Permission::Admin])
        .await?;

    let member = ProjectService::new(&state.db)
        .add_user(id, payload.user_id, payload.role)
        .await?;

    Ok((
        StatusCode::CREATED,
        message("User assigned to project", member.into_dto()),
    ))
}

#[utoipa::path(
    delete,
    path = "/api/projects/{id}/users/{user_id}",
    tag = PROJECT_TAG,
    params(
        ("id" = i32, Path, description = "Project ID"),
        ("user_id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User removed", body = StatusMessageDto),
        (status = 404, description = "Membership not found", body = ErrorDto)
    ),
    security(("bearer_auth" = [])),
)]
pub async fn remove_project_user(
    State(state): State<AppState>,
    token: BearerToken,
    Path((id, user_id)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[Permission::Admin])
        .await?;

    ProjectService::new(&state.db)
        .remove_user(id, user_id)
        .await?;

    Ok(status_message("User removed from project"))
}

#[utoipa::path(
    get,
    path = "/api/projects/{id}/employees",
    tag = PROJECT_TAG,
    params(("id" = i32, Path, description = "Project ID")),
    responses(
        (status = 200, description = "Assigned employees", body = DataDto<Vec<ProjectEmployeeDto>>),
        (status = 404, description = "Project not found", body = ErrorDto)
    ),
    security(("bearer_auth" = [])),
)]
pub async fn get_project_employees(
    State(state): State<AppState>,
    token: BearerToken,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[])
        .await?;

    let assignments = ProjectService::new(&state.db).get_employees(id).await?;

    Ok(data(
        assignments
            .into_iter()
            .map(|a| a.into_dto())
            .collect::<Vec<_>>(),
    ))
}

#[utoipa::path(
    post,
    path = "/api/projects/{id}/employees",
    tag = PROJECT_TAG,
    params(("id" = i32, Path, description = "Project ID")),
    request_body = AddProjectEmployeeDto,
    responses(
        (status = 201, description = "Employee assigned", body = MessageDto<ProjectEmployeeDto>),
        (status = 400, description = "Employee already assigned", body = ErrorDto),
        (status = 404, description = "Project or employee not found", body = ErrorDto)
    ),
    security(("bearer_auth" = [])),
)]
pub async fn add_project_employee(
    State(state): State<AppState>,
    token: BearerToken,
    Path(id): Path<i32>,
    Json(payload): Json<AddProjectEmployeeDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[Permission::Admin])
        .await?;

    let assignment = ProjectService::new(&state.db)
        .add_employee(id, payload.employee_id, payload.role)
        .await?;

    Ok((
        StatusCode::CREATED,
        message("Employee assigned to project", assignment.into_dto()),
    ))
}

#[utoipa::path(
    delete,
    path = "/api/projects/{id}/employees/{employee_id}",
    tag = PROJECT_TAG,
    params(
        ("id" = i32, Path, description = "Project ID"),
        ("employee_id" = i32, Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Employee removed", body = StatusMessageDto),
        (status = 404, description = "Assignment not found", body = ErrorDto)
    ),
    security(("bearer_auth" = [])),
)]
pub async fn remove_project_employee(
    State(state): State<AppState>,
    token: BearerToken,
    Path((id, employee_id)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[Permission::Admin])
        .await?;

    ProjectService::new(&state.db)
        .remove_employee(id, employee_id)
        .await?;

    Ok(status_message("Employee removed from project"))
}
