use chrono::{DateTime, Utc};

use crate::model::notification::NotificationDto;
use entity::enums::{NotificationCategory, NotificationKind};

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: i32,
    pub user_id: i32,
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

impl Notification {
    pub fn from_entity(entity: entity::notification::Model) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            title: entity.title,
            message: entity.message,
            kind: entity.kind,
            category: entity.category,
            reference_type: entity.reference_type,
            reference_id: entity.reference_id,
            is_read: entity.is_read,
            read_at: entity.read_at,
            created_at: entity.created_at,
        }
    }

    pub fn into_dto(self) -> NotificationDto {
        NotificationDto {
            id: self.id,
            title: self.title,
            message: self.message,
            kind: self.kind,
            category: self.category,
            reference_type: self.reference_type,
            reference_id: self.reference_id,
            is_read: self.is_read,
            read_at: self.read_at,
            created_at: self.created_at,
        }
    }
}

/// Content of a notification before it is addressed to a user.
#[derive(Debug, Clone)]
pub struct NotificationContent {
    pub title: String,
    pub message: String,
    pub kind: NotificationKind,
    pub category: NotificationCategory,
    pub reference_type: Option<String>,
    pub reference_id: Option<i32>,
}
