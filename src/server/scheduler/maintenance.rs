use sea_orm::DatabaseConnection;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::server::{
    error::AppError, middleware::cache::ResponseCache,
    service::notification::NotificationService,
};

/// Hourly, on the hour.
pub const CACHE_PURGE_SCHEDULE: &str = "0 0 * * * *";
/// Daily at 08:00.
pub const LOW_STOCK_SCHEDULE: &str = "0 0 8 * * *";
/// Daily at 03:00.
pub const NOTIFICATION_CLEANUP_SCHEDULE: &str = "0 0 3 * * *";

/// Read notifications older than this many days are deleted by the nightly cleanup.
pub const READ_NOTIFICATION_RETENTION_DAYS: i64 = 30;

/// Starts the maintenance scheduler
///
/// Runs three jobs:
/// - hourly purge of expired response cache entries
/// - daily low-stock sweep notifying admin and warehouse users
/// - nightly deletion of old read notifications
///
/// Job failures are logged and never stop the scheduler.
///
/// # Arguments
/// - `db`: Database connection
/// - `cache`: Response cache shared with the router
pub async fn start_scheduler(db: DatabaseConnection, cache: ResponseCache) -> Result<(), AppError> {
    let scheduler = JobScheduler::new().await?;

    let purge_cache = cache.clone();
    let purge_job = Job::new_async(CACHE_PURGE_SCHEDULE, move |_uuid, _lock| {
        let cache = purge_cache.clone();

        Box::pin(async move {
            let purged = cache.purge_expired().await;
            if purged > 0 {
                tracing::debug!("Purged {} expired cached responses", purged);
            }
        })
    })?;

    let sweep_db = db.clone();
    let sweep_job = Job::new_async(LOW_STOCK_SCHEDULE, move |_uuid, _lock| {
        let db = sweep_db.clone();
        let cache = cache.clone();

        Box::pin(async move {
            if let Err(e) = sweep_low_stock(&db, &cache).await {
                tracing::error!("Error running low-stock sweep: {}", e);
            }
        })
    })?;

    let cleanup_db = db.clone();
    let cleanup_job = Job::new_async(NOTIFICATION_CLEANUP_SCHEDULE, move |_uuid, _lock| {
        let db = cleanup_db.clone();

        Box::pin(async move {
            if let Err(e) = purge_read_notifications(&db).await {
                tracing::error!("Error deleting old notifications: {}", e);
            }
        })
    })?;

    scheduler.add(purge_job).await?;
    scheduler.add(sweep_job).await?;
    scheduler.add(cleanup_job).await?;
    scheduler.start().await?;

    tracing::info!("Maintenance scheduler started");

    Ok(())
}

/// Notifies stock managers about every material at or below its minimum.
async fn sweep_low_stock(db: &DatabaseConnection, cache: &ResponseCache) -> Result<(), AppError> {
    let created = NotificationService::new(db).sweep_low_stock().await?;

    tracing::info!("Low-stock sweep created {} notifications", created);
    if created > 0 {
        cache.invalidate("notifications").await;
    }

    Ok(())
}

async fn purge_read_notifications(db: &DatabaseConnection) -> Result<(), AppError> {
    let deleted = NotificationService::new(db)
        .purge_read_older_than(READ_NOTIFICATION_RETENTION_DAYS)
        .await?;

    if deleted > 0 {
        tracing::info!("Deleted {} read notifications", deleted);
    }

    Ok(())
}
