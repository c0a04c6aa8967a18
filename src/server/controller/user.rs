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
        user::{CreateUserDto, UpdateUserDto, UserDto},
    },
    server::{
        controller::{data, message, status_message},
        error::AppError,
        middleware::auth::{AuthGuard, BearerToken, Permission},
        model::{
            pagination::Pagination,
            user::{NewUser, UpdateUserParams},
        },
        service::user::UserService,
        state::AppState,
    },
};

/// Tag for grouping user endpoints in OpenAPI documentation
pub static USER_TAG: &str = "user";

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UserQuery {
    /// Matches username, email or full name
    pub search: Option<String>,
    pub page: Option<u64>,
    pub per_page: Option<u64>,
}

/// List users.
///
/// # Access Control
/// - `Admin`
///
/// # Returns
/// - `200 OK` - Page of users
/// - `401 Unauthorized` / `403 Forbidden` - Not an admin
#[utoipa::path(
    get,
    path = "/api/users",
    tag = USER_TAG,
    params(UserQuery),
    responses(
        (status = 200, description = "Page of users", body = PaginatedDto<UserDto>),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto)
    ),
    security(("bearer_auth" = [])),
)]
pub async fn get_users(
    State(state): State<AppState>,
    token: BearerToken,
    Query(query): Query<UserQuery>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[Permission::Admin])
        .await?;

    let page = UserService::new(&state.db)
        .get_paginated(
            query.search.as_deref().filter(|s| !s.trim().is_empty()),
            Pagination::new(query.page, query.per_page),
        )
        .await?;

    Ok(Json(page.into_dto(|u| u.into_dto())))
}

#[utoipa::path(
    get,
    path = "/api/users/{id}",
    tag = USER_TAG,
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User", body = DataDto<UserDto>),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto)
    ),
    security(("bearer_auth" = [])),
)]
pub async fn get_user(
    State(state): State<AppState>,
    token: BearerToken,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[Permission::Admin])
        .await?;

    let user = UserService::new(&state.db).get_by_id(id).await?;

    Ok(data(user.into_dto()))
}

/// Create a user.
///
/// # Returns
/// - `201 Created` - The new user
/// - `400 Bad Request` - Validation failure or duplicate username/email
#[utoipa::path(
    post,
    path = "/api/users",
    tag = USER_TAG,
    request_body = CreateUserDto,
    responses(
        (status = 201, description = "User created", body = MessageDto<UserDto>),
        (status = 400, description = "Invalid user data", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto)
    ),
    security(("bearer_auth" = [])),
)]
pub async fn create_user(
    State(state): State<AppState>,
    token: BearerToken,
    Json(payload): Json<CreateUserDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[Permission::Admin])
        .await?;

    let user = UserService::new(&state.db)
        .create(NewUser::from_dto(payload))
        .await?;

    Ok((
        StatusCode::CREATED,
        message("User created successfully", user.into_dto()),
    ))
}

/// Update a user. A provided password is re-hashed.
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    tag = USER_TAG,
    params(("id" = i32, Path, description = "User ID")),
    request_body = UpdateUserDto,
    responses(
        (status = 200, description = "User updated", body = MessageDto<UserDto>),
        (status = 400, description = "Invalid user data", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto)
    ),
    security(("bearer_auth" = [])),
)]
pub async fn update_user(
    State(state): State<AppState>,
    token: BearerToken,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateUserDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[Permission::Admin])
        .await?;

    let user = UserService::new(&state.db)
        .update(id, UpdateUserParams::from_dto(payload))
        .await?;

    Ok(message("User updated successfully", user.into_dto()))
}

/// Delete a user. Admins cannot delete themselves.
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    tag = USER_TAG,
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User deleted", body = StatusMessageDto),
        (status = 400, description = "Attempted to delete own account", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto)
    ),
    security(("bearer_auth" = [])),
)]
pub async fn delete_user(
    State(state): State<AppState>,
    token: BearerToken,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let admin = AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[Permission::Admin])
        .await?;

    UserService::new(&state.db).delete(admin.id, id).await?;

    Ok(status_message("User deleted successfully"))
}
