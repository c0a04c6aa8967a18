use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    model::{
        api::{CountDto, ErrorDto, MessageDto},
        notification::{NotificationDto, NotificationListDto, NotificationMetaDto},
    },
    server::{
        controller::message,
        error::AppError,
        middleware::auth::{AuthGuard, BearerToken},
        model::pagination::Pagination,
        service::notification::NotificationService,
        state::AppState,
    },
};

pub static NOTIFICATION_TAG: &str = "notification";

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NotificationQuery {
    /// Only return unread notifications
    #[serde(default)]
    pub unread_only: bool,
    pub page: Option<u64>,
    pub per_page: Option<u64>,
}

/// List the caller's notifications, newest first.
///
/// The meta block carries the caller's total unread count regardless of `unread_only`.
#[utoipa::path(
    get,
    path = "/api/notifications",
    tag = NOTIFICATION_TAG,
    params(NotificationQuery),
    responses(
        (status = 200, description = "Page of notifications", body = NotificationListDto),
        (status = 401, description = "Not authenticated", body = ErrorDto)
    ),
    security(("bearer_auth" = [])),
)]
pub async fn get_notifications(
    State(state): State<AppState>,
    token: BearerToken,
    Query(query): Query<NotificationQuery>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[])
        .await?;

    let (page, unread_count) = NotificationService::new(&state.db)
        .get_paginated(
            user.id,
            query.unread_only,
            Pagination::new(query.page, query.per_page),
        )
        .await?;

    let meta = page.meta();

    Ok(Json(NotificationListDto {
        data: page.items.into_iter().map(|n| n.into_dto()).collect(),
        meta: NotificationMetaDto {
            total: meta.total,
            page: meta.page,
            per_page: meta.per_page,
            total_pages: meta.total_pages,
            unread_count,
        },
    }))
}

#[utoipa::path(
    put,
    path = "/api/notifications/{id}/read",
    tag = NOTIFICATION_TAG,
    params(("id" = i32, Path, description = "Notification ID")),
    responses(
        (status = 200, description = "Notification marked read", body = MessageDto<NotificationDto>),
        (status = 404, description = "Notification not found", body = ErrorDto)
    ),
    security(("bearer_auth" = [])),
)]
pub async fn mark_notification_read(
    State(state): State<AppState>,
    token: BearerToken,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[])
        .await?;

    let notification = NotificationService::new(&state.db)
        .mark_read(user.id, id)
        .await?;

    Ok(message("Notification marked as read", notification.into_dto()))
}

#[utoipa::path(
    put,
    path = "/api/notifications/read-all",
    tag = NOTIFICATION_TAG,
    responses(
        (status = 200, description = "Number of notifications marked read", body = MessageDto<CountDto>)
    ),
    security(("bearer_auth" = [])),
)]
pub async fn mark_all_notifications_read(
    State(state): State<AppState>,
    token: BearerToken,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[])
        .await?;

    let count = NotificationService::new(&state.db)
        .mark_all_read(user.id)
        .await?;

    Ok(message("All notifications marked as read", CountDto { count }))
}

#[utoipa::path(
    delete,
    path = "/api/notifications/read",
    tag = NOTIFICATION_TAG,
    responses(
        (status = 200, description = "Number of notifications deleted", body = MessageDto<CountDto>)
    ),
    security(("bearer_auth" = [])),
)]
pub async fn delete_read_notifications(
    State(state): State<AppState>,
    token: BearerToken,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[])
        .await?;

    let count = NotificationService::new(&state.db)
        .delete_read(user.id)
        .await?;

    Ok(message("Read notifications deleted", CountDto { count }))
}
