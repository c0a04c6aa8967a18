use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use entity::enums::{NotificationCategory, NotificationKind};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NotificationDto {
    pub id: i32,
    pub title: String,
    pub message: String,
    pub kind: NotificationKind,
    pub category: NotificationCategory,
    pub reference_type: Option<String>,
    pub reference_id: Option<i32>,
    pub is_read: bool,
    pub read_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Page metadata for notification lists, which also report the caller's unread total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NotificationMetaDto {
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
    pub unread_count: u64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct NotificationListDto {
    pub data: Vec<NotificationDto>,
    pub meta: NotificationMetaDto,
}
