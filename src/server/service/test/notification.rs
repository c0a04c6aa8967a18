use super::*;
use crate::server::service::notification::NotificationService;
use entity::enums::UserRole;
use sea_orm::{EntityTrait, PaginatorTrait};

/// Tests the daily low stock sweep twice in a row.
///
/// Expected: the first run alerts every stock user once per low material; the second
/// run creates nothing while those alerts are unread
#[tokio::test]
async fn sweep_skips_unread_alerts() -> Result<(), AppError> {
    let test = TestBuilder::new().with_request_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::user::create_user_with_role(db, UserRole::Admin).await?;
    factory::user::create_user_with_role(db, UserRole::Warehouse).await?;
    factory::user::create_user_with_role(db, UserRole::Contractor).await?;
    let uom = factory::create_uom(db).await?;
    factory::material::MaterialFactory::new(db, uom.id)
        .stock_qty(2.0)
        .min_stock_qty(5.0)
        .build()
        .await?;
    factory::material::MaterialFactory::new(db, uom.id)
        .stock_qty(50.0)
        .min_stock_qty(5.0)
        .build()
        .await?;

    let service = NotificationService::new(db);

    assert_eq!(service.sweep_low_stock().await?, 2);
    assert_eq!(service.sweep_low_stock().await?, 0);
    assert_eq!(entity::prelude::Notification::find().count(db).await?, 2);

    Ok(())
}

/// Tests the sweep once an alert has been read.
///
/// Expected: only the user who read the alert is notified again
#[tokio::test]
async fn sweep_realerts_after_read() -> Result<(), AppError> {
    let test = TestBuilder::new().with_request_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = factory::user::create_user_with_role(db, UserRole::Admin).await?;
    factory::user::create_user_with_role(db, UserRole::Warehouse).await?;
    let uom = factory::create_uom(db).await?;
    factory::material::MaterialFactory::new(db, uom.id)
        .stock_qty(0.0)
        .min_stock_qty(1.0)
        .build()
        .await?;

    let service = NotificationService::new(db);
    service.sweep_low_stock().await?;
    service.mark_all_read(admin.id).await?;

    assert_eq!(service.sweep_low_stock().await?, 1);

    Ok(())
}
