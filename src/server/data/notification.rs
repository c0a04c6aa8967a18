//! Notification data repository.
//!
//! Every read and write except the maintenance sweep is scoped to one user, so a caller
//! can never see or touch another user's notifications.

use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::model::{
    notification::{Notification, NotificationContent},
    pagination::Pagination,
};
use entity::enums::NotificationCategory;

/// Repository providing database operations for user notifications.
pub struct NotificationRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> NotificationRepository<'a> {
    /// Creates a new NotificationRepository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    ///
    /// # Returns
    /// - `NotificationRepository` - New repository instance
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    fn active_model(user_id: i32, content: NotificationContent) -> entity::notification::ActiveModel {
        let now = Utc::now();
        entity::notification::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            title: ActiveValue::Set(content.title),
            message: ActiveValue::Set(content.message),
            kind: ActiveValue::Set(content.kind),
            category: ActiveValue::Set(content.category),
            reference_type: ActiveValue::Set(content.reference_type),
            reference_id: ActiveValue::Set(content.reference_id),
            is_read: ActiveValue::Set(false),
            read_at: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
    }

    /// Creates one unread notification for a user.
    pub async fn create(
        &self,
        user_id: i32,
        content: NotificationContent,
    ) -> Result<Notification, DbErr> {
        let entity = Self::active_model(user_id, content).insert(self.db).await?;

        Ok(Notification::from_entity(entity))
    }

    /// Creates the same notification for each of the given users.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of notifications inserted
    /// - `Err(DbErr)` - Database error during insert
    pub async fn create_many(
        &self,
        user_ids: &[i32],
        content: NotificationContent,
    ) -> Result<u64, DbErr> {
        if user_ids.is_empty() {
            return Ok(0);
        }

        let models: Vec<_> = user_ids
            .iter()
            .map(|user_id| Self::active_model(*user_id, content.clone()))
            .collect();

        entity::prelude::Notification::insert_many(models)
            .exec(self.db)
            .await?;

        Ok(user_ids.len() as u64)
    }

    /// Gets a page of a user's notifications, newest first.
    ///
    /// # Arguments
    /// - `user_id` - Owner of the notifications
    /// - `unread_only` - Only return notifications not yet read
    /// - `pagination` - Page to fetch
    ///
    /// # Returns
    /// - `Ok((Vec<Notification>, u64))` - Notifications on the page and the total number
    ///   of matches
    /// - `Err(DbErr)` - Database error during query
    pub async fn get_paginated(
        &self,
        user_id: i32,
        unread_only: bool,
        pagination: Pagination,
    ) -> Result<(Vec<Notification>, u64), DbErr> {
        let mut query = entity::prelude::Notification::find()
            .filter(entity::notification::Column::UserId.eq(user_id))
            .order_by_desc(entity::notification::Column::CreatedAt)
            .order_by_desc(entity::notification::Column::Id);
        if unread_only {
            query = query.filter(entity::notification::Column::IsRead.eq(false));
        }

        let paginator = query.paginate(self.db, pagination.per_page);
        let total = paginator.num_items().await?;
        let notifications = paginator
            .fetch_page(pagination.index())
            .await?
            .into_iter()
            .map(Notification::from_entity)
            .collect();

        Ok((notifications, total))
    }

    pub async fn count_unread(&self, user_id: i32) -> Result<u64, DbErr> {
        entity::prelude::Notification::find()
            .filter(entity::notification::Column::UserId.eq(user_id))
            .filter(entity::notification::Column::IsRead.eq(false))
            .count(self.db)
            .await
    }

    /// Marks one of the user's notifications as read.
    ///
    /// # Returns
    /// - `Ok(Some(Notification))` - The notification, now read
    /// - `Ok(None)` - No such notification owned by this user
    pub async fn mark_read(&self, id: i32, user_id: i32) -> Result<Option<Notification>, DbErr> {
        let Some(model) = entity::prelude::Notification::find_by_id(id)
            .filter(entity::notification::Column::UserId.eq(user_id))
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        if model.is_read {
            return Ok(Some(Notification::from_entity(model)));
        }

        let now = Utc::now();
        let mut active: entity::notification::ActiveModel = model.into();
        active.is_read = ActiveValue::Set(true);
        active.read_at = ActiveValue::Set(Some(now));
        active.updated_at = ActiveValue::Set(now);

        Ok(Some(Notification::from_entity(active.update(self.db).await?)))
    }

    /// Marks every unread notification of the user as read and returns how many changed.
    pub async fn mark_all_read(&self, user_id: i32) -> Result<u64, DbErr> {
        let now = Utc::now();
        let result = entity::prelude::Notification::update_many()
            .col_expr(entity::notification::Column::IsRead, Expr::value(true))
            .col_expr(entity::notification::Column::ReadAt, Expr::value(now))
            .col_expr(entity::notification::Column::UpdatedAt, Expr::value(now))
            .filter(entity::notification::Column::UserId.eq(user_id))
            .filter(entity::notification::Column::IsRead.eq(false))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Deletes the user's read notifications and returns how many were removed.
    pub async fn delete_read(&self, user_id: i32) -> Result<u64, DbErr> {
        let result = entity::prelude::Notification::delete_many()
            .filter(entity::notification::Column::UserId.eq(user_id))
            .filter(entity::notification::Column::IsRead.eq(true))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Deletes read notifications of every user created before `cutoff`.
    pub async fn delete_read_older_than(&self, cutoff: DateTime<Utc>) -> Result<u64, DbErr> {
        let result = entity::prelude::Notification::delete_many()
            .filter(entity::notification::Column::IsRead.eq(true))
            .filter(entity::notification::Column::CreatedAt.lt(cutoff))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Checks whether the user already has an unread notification about a reference.
    pub async fn exists_unread(
        &self,
        user_id: i32,
        category: NotificationCategory,
        reference_type: &str,
        reference_id: i32,
    ) -> Result<bool, DbErr> {
        let count = entity::prelude::Notification::find()
            .filter(entity::notification::Column::UserId.eq(user_id))
            .filter(entity::notification::Column::Category.eq(category))
            .filter(entity::notification::Column::ReferenceType.eq(reference_type))
            .filter(entity::notification::Column::ReferenceId.eq(reference_id))
            .filter(entity::notification::Column::IsRead.eq(false))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }
}
