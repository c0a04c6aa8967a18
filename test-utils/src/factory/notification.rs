//! Notification factory.

use chrono::Utc;
use entity::enums::{NotificationCategory, NotificationKind};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

pub struct NotificationFactory<'a> {
    db: &'a DatabaseConnection,
    user_id: i32,
    title: String,
    category: NotificationCategory,
    reference_type: Option<String>,
    reference_id: Option<i32>,
    is_read: bool,
}

impl<'a> NotificationFactory<'a> {
    /// Creates a factory for an unread `system` notification addressed to `user_id`.
    pub fn new(db: &'a DatabaseConnection, user_id: i32) -> Self {
        Self {
            db,
            user_id,
            title: "Test notification".to_string(),
            category: NotificationCategory::System,
            reference_type: None,
            reference_id: None,
            is_read: false,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn category(mut self, category: NotificationCategory) -> Self {
        self.category = category;
        self
    }

    /// Points the notification at a domain row, e.g. `("material", 3)`.
    pub fn reference(mut self, reference_type: impl Into<String>, reference_id: i32) -> Self {
        self.reference_type = Some(reference_type.into());
        self.reference_id = Some(reference_id);
        self
    }

    pub fn is_read(mut self, is_read: bool) -> Self {
        self.is_read = is_read;
        self
    }

    pub async fn build(self) -> Result<entity::notification::Model, DbErr> {
        let now = Utc::now();
        entity::notification::ActiveModel {
            user_id: ActiveValue::Set(self.user_id),
            title: ActiveValue::Set(self.title),
            message: ActiveValue::Set("Test message".to_string()),
            kind: ActiveValue::Set(NotificationKind::Info),
            category: ActiveValue::Set(self.category),
            reference_type: ActiveValue::Set(self.reference_type),
            reference_id: ActiveValue::Set(self.reference_id),
            is_read: ActiveValue::Set(self.is_read),
            read_at: ActiveValue::Set(self.is_read.then_some(now)),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

pub async fn create_notification(
    db: &DatabaseConnection,
    user_id: i32,
) -> Result<entity::notification::Model, DbErr> {
    NotificationFactory::new(db, user_id).build().await
}
