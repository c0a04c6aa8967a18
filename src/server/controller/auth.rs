use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
    model::{
        api::{DataDto, ErrorDto, MessageDto, StatusMessageDto},
        auth::{AuthSessionDto, ChangePasswordDto, LoginDto, RegisterDto},
        user::UserDto,
    },
    server::{
        controller::{data, message, status_message},
        error::AppError,
        middleware::auth::{AuthGuard, BearerToken},
        model::user::NewUser,
        service::auth::AuthService,
        state::AppState,
    },
};

/// Tag for grouping auth endpoints in OpenAPI documentation
pub static AUTH_TAG: &str = "auth";

/// Register a new account.
///
/// Creates an active user with the requested role and signs them in straight away.
///
/// # Returns
/// - `201 Created` - The new user and a bearer token
/// - `400 Bad Request` - Validation failure, or the username or email is taken
/// - `429 Too Many Requests` - Auth rate limit exceeded
#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = AUTH_TAG,
    request_body = RegisterDto,
    responses(
        (status = 201, description = "Account created", body = MessageDto<AuthSessionDto>),
        (status = 400, description = "Invalid registration data", body = ErrorDto),
        (status = 429, description = "Too many requests", body = ErrorDto)
    ),
)]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterDto>,
) -> Result<impl IntoResponse, AppError> {
    let new_user = NewUser {
        username: payload.username.trim().to_string(),
        email: payload.email.trim().to_string(),
        password: payload.password,
        full_name: payload.full_name.trim().to_string(),
        role: payload.role,
        phone: payload.phone,
        is_active: true,
    };

    let (user, token) = AuthService::new(&state.db, &state.jwt)
        .register(new_user)
        .await?;

    Ok((
        StatusCode::CREATED,
        message(
            "User registered successfully",
            AuthSessionDto {
                user: user.into_dto(),
                token,
            },
        ),
    ))
}

/// Log in with username and password.
///
/// # Returns
/// - `200 OK` - The user and a bearer token
/// - `401 Unauthorized` - Invalid credentials
/// - `429 Too Many Requests` - Auth rate limit exceeded
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = AUTH_TAG,
    request_body = LoginDto,
    responses(
        (status = 200, description = "Logged in", body = MessageDto<AuthSessionDto>),
        (status = 401, description = "Invalid credentials", body = ErrorDto),
        (status = 429, description = "Too many requests", body = ErrorDto)
    ),
)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginDto>,
) -> Result<impl IntoResponse, AppError> {
    let (user, token) = AuthService::new(&state.db, &state.jwt)
        .login(payload.username.trim(), &payload.password)
        .await?;

    Ok(message(
        "Login successful",
        AuthSessionDto {
            user: user.into_dto(),
            token,
        },
    ))
}

/// Get the current user.
#[utoipa::path(
    get,
    path = "/api/auth/profile",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "Current user", body = DataDto<UserDto>),
        (status = 401, description = "Not authenticated", body = ErrorDto)
    ),
    security(("bearer_auth" = [])),
)]
pub async fn profile(
    State(state): State<AppState>,
    token: BearerToken,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[])
        .await?;

    Ok(data(user.into_dto()))
}

/// Change the current user's password.
///
/// # Returns
/// - `200 OK` - Password changed
/// - `400 Bad Request` - New password too short
/// - `401 Unauthorized` - Not authenticated or current password wrong
#[utoipa::path(
    put,
    path = "/api/auth/change-password",
    tag = AUTH_TAG,
    request_body = ChangePasswordDto,
    responses(
        (status = 200, description = "Password changed", body = StatusMessageDto),
        (status = 400, description = "Invalid new password", body = ErrorDto),
        (status = 401, description = "Not authenticated or wrong current password", body = ErrorDto)
    ),
    security(("bearer_auth" = [])),
)]
pub async fn change_password(
    State(state): State<AppState>,
    token: BearerToken,
    Json(payload): Json<ChangePasswordDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[])
        .await?;

    AuthService::new(&state.db, &state.jwt)
        .change_password(user.id, &payload.current_password, &payload.new_password)
        .await?;

    Ok(status_message("Password changed successfully"))
}
