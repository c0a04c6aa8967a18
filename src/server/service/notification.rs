//! In-app notifications and the stock level alerts derived from them.

use chrono::{Duration, Utc};
use sea_orm::DatabaseConnection;

use crate::server::{
    data::{material::MaterialRepository, notification::NotificationRepository, user::UserRepository},
    error::AppError,
    model::{
        material::Material,
        notification::{Notification, NotificationContent},
        pagination::{Paginated, Pagination},
    },
};
use entity::enums::{NotificationCategory, NotificationKind, UserRole};

/// Roles alerted when a material runs low.
pub const STOCK_ALERT_ROLES: &[UserRole] = &[UserRole::Admin, UserRole::Warehouse];

const MATERIAL_REFERENCE: &str = "material";

pub struct NotificationService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> NotificationService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists the caller's notifications alongside their unread count.
    pub async fn get_paginated(
        &self,
        user_id: i32,
        unread_only: bool,
        pagination: Pagination,
    ) -> Result<(Paginated<Notification>, u64), AppError> {
        let repo = NotificationRepository::new(self.db);

        let (notifications, total) = repo.get_paginated(user_id, unread_only, pagination).await?;
        let unread = repo.count_unread(user_id).await?;

        Ok((Paginated::new(notifications, total, pagination), unread))
    }

    /// Marks one of the caller's notifications as read.
    ///
    /// Notifications owned by someone else are reported as missing.
    pub async fn mark_read(&self, user_id: i32, id: i32) -> Result<Notification, AppError> {
        NotificationRepository::new(self.db)
            .mark_read(id, user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Notification not found".to_string()))
    }

    pub async fn mark_all_read(&self, user_id: i32) -> Result<u64, AppError> {
        Ok(NotificationRepository::new(self.db)
            .mark_all_read(user_id)
            .await?)
    }

    pub async fn delete_read(&self, user_id: i32) -> Result<u64, AppError> {
        Ok(NotificationRepository::new(self.db)
            .delete_read(user_id)
            .await?)
    }

    pub async fn notify(
        &self,
        user_id: i32,
        content: NotificationContent,
    ) -> Result<Notification, AppError> {
        Ok(NotificationRepository::new(self.db)
            .create(user_id, content)
            .await?)
    }

    /// Sends the same notification to every active user holding one of `roles`.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of notifications created
    pub async fn notify_roles(
        &self,
        roles: &[UserRole],
        content: NotificationContent,
    ) -> Result<u64, AppError> {
        let user_ids = UserRepository::new(self.db)
            .active_ids_with_roles(roles)
            .await?;

        if user_ids.is_empty() {
            return Ok(0);
        }

        Ok(NotificationRepository::new(self.db)
            .create_many(&user_ids, content)
            .await?)
    }

    /// Alerts admins and warehouse users that `material` is at or below its minimum.
    pub async fn notify_stock_level(&self, material: &Material) -> Result<u64, AppError> {
        tracing::info!(
            "Low stock for material {} ({}): {} <= {}",
            material.code,
            material.id,
            material.stock_qty,
            material.min_stock_qty
        );

        self.notify_roles(STOCK_ALERT_ROLES, stock_level_content(material))
            .await
    }

    /// Notifies admins and warehouse users about every low stock material.
    ///
    /// Users who still have an unread alert for a material are skipped so the daily
    /// sweep does not pile up duplicates.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of notifications created
    pub async fn sweep_low_stock(&self) -> Result<u64, AppError> {
        let materials = MaterialRepository::new(self.db).get_low_stock().await?;
        if materials.is_empty() {
            return Ok(0);
        }

        let user_ids = UserRepository::new(self.db)
            .active_ids_with_roles(STOCK_ALERT_ROLES)
            .await?;
        let repo = NotificationRepository::new(self.db);

        let mut created = 0;
        for material in &materials {
            let mut recipients = Vec::with_capacity(user_ids.len());
            for &user_id in &user_ids {
                let already_alerted = repo
                    .exists_unread(
                        user_id,
                        NotificationCategory::StockLevel,
                        MATERIAL_REFERENCE,
                        material.id,
                    )
                    .await?;
                if !already_alerted {
                    recipients.push(user_id);
                }
            }

            if !recipients.is_empty() {
                created += repo
                    .create_many(&recipients, stock_level_content(material))
                    .await?;
            }
        }

        Ok(created)
    }

    /// Deletes read notifications older than `days`.
    pub async fn purge_read_older_than(&self, days: i64) -> Result<u64, AppError> {
        let cutoff = Utc::now() - Duration::days(days);

        Ok(NotificationRepository::new(self.db)
            .delete_read_older_than(cutoff)
            .await?)
    }
}

fn stock_level_content(material: &Material) -> NotificationContent {
    let kind = if material.stock_qty <= 0.0 {
        NotificationKind::Error
    } else {
        NotificationKind::Warning
    };

    NotificationContent {
        title: "Low stock".to_string(),
        message: format!(
            "{} ({}) is down to {} (minimum {})",
            material.name, material.code, material.stock_qty, material.min_stock_qty
        ),
        kind,
        category: NotificationCategory::StockLevel,
        reference_type: Some(MATERIAL_REFERENCE.to_string()),
        reference_id: Some(material.id),
    }
}
