use super::*;
use crate::server::service::material::MaterialService;
use entity::enums::{MovementKind, NotificationCategory, StockReference, UserRole};
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};

/// Tests setting a material's stock.
///
/// Expected: an adjustment movement recording the previous and new stock
#[tokio::test]
async fn records_stock_adjustment() -> Result<(), AppError> {
    let test = TestBuilder::new().with_request_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let uom = factory::create_uom(db).await?;
    let material = factory::material::MaterialFactory::new(db, uom.id)
        .stock_qty(40.0)
        .min_stock_qty(5.0)
        .build()
        .await?;

    let updated = MaterialService::new(db)
        .update_stock(user.id, material.id, 25.0, Some("cycle count".to_string()))
        .await?;

    assert_eq!(updated.stock_qty, 25.0);

    let movements = entity::prelude::StockMovement::find().all(db).await?;
    assert_eq!(movements.len(), 1);
    assert_eq!(movements[0].kind, MovementKind::Out);
    assert_eq!(movements[0].quantity, 15.0);
    assert_eq!(movements[0].previous_stock, 40.0);
    assert_eq!(movements[0].new_stock, 25.0);
    assert_eq!(movements[0].reference_type, StockReference::Adjustment);
    assert_eq!(movements[0].notes.as_deref(), Some("cycle count"));

    Ok(())
}

/// Tests setting the stock to its current value.
///
/// Expected: Ok with no movement recorded
#[tokio::test]
async fn unchanged_stock_records_nothing() -> Result<(), AppError> {
    let test = TestBuilder::new().with_request_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let uom = factory::create_uom(db).await?;
    let material = factory::material::MaterialFactory::new(db, uom.id)
        .stock_qty(12.0)
        .build()
        .await?;

    MaterialService::new(db)
        .update_stock(user.id, material.id, 12.0, None)
        .await?;

    assert_eq!(entity::prelude::StockMovement::find().count(db).await?, 0);

    Ok(())
}

/// Tests a negative stock value.
///
/// Expected: Err(AppError::Validation)
#[tokio::test]
async fn rejects_negative_stock() -> Result<(), AppError> {
    let test = TestBuilder::new().with_request_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let uom = factory::create_uom(db).await?;
    let material = factory::material::MaterialFactory::new(db, uom.id)
        .build()
        .await?;

    let result = MaterialService::new(db)
        .update_stock(user.id, material.id, -1.0, None)
        .await;

    assert!(matches!(result, Err(AppError::Validation(_))));

    Ok(())
}

/// Tests dropping the stock to the minimum.
///
/// Expected: admins and warehouse users alerted; engineers not
#[tokio::test]
async fn alerts_on_low_stock() -> Result<(), AppError> {
    let test = TestBuilder::new().with_request_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = factory::user::create_user_with_role(db, UserRole::Admin).await?;
    let keeper = factory::user::create_user_with_role(db, UserRole::Warehouse).await?;
    let engineer = factory::user::create_user_with_role(db, UserRole::Engineer).await?;
    let uom = factory::create_uom(db).await?;
    let material = factory::material::MaterialFactory::new(db, uom.id)
        .stock_qty(30.0)
        .min_stock_qty(10.0)
        .build()
        .await?;

    MaterialService::new(db)
        .update_stock(admin.id, material.id, 10.0, None)
        .await?;

    for (user_id, expected) in [(admin.id, 1), (keeper.id, 1), (engineer.id, 0)] {
        let alerts = entity::prelude::Notification::find()
            .filter(entity::notification::Column::UserId.eq(user_id))
            .filter(entity::notification::Column::Category.eq(NotificationCategory::StockLevel))
            .count(db)
            .await?;
        assert_eq!(alerts, expected);
    }

    Ok(())
}
