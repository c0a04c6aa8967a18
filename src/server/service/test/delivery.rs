use super::*;
use crate::server::service::delivery::DeliveryService;
use entity::enums::{DeliveryStatus, MovementKind, RequestStatus, StockReference};
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryFilter};

/// Creates an approved request for `requested_qty` against a material holding `stock`.
async fn approved_request(
    db: &DatabaseConnection,
    stock: f64,
    requested_qty: f64,
    revised_qty: Option<f64>,
) -> Result<(entity::user::Model, entity::material::Model, entity::request::Model), DbErr> {
    let user = factory::create_user(db).await?;
    let project = factory::create_project(db).await?;
    let uom = factory::create_uom(db).await?;
    let material = factory::material::MaterialFactory::new(db, uom.id)
        .stock_qty(stock)
        .min_stock_qty(1.0)
        .build()
        .await?;
    let request = factory::request::RequestFactory::new(db, user.id, project.id, material.id)
        .requested_qty(requested_qty)
        .revised_qty(revised_qty)
        .status(RequestStatus::Approved)
        .build()
        .await?;

    Ok((user, material, request))
}

/// Tests completing delivery of an approved request.
///
/// Expected: stock deducted, outgoing movement recorded, request delivered and the
/// requester notified
#[tokio::test]
async fn completes_approved_request() -> Result<(), AppError> {
    let test = TestBuilder::new().with_request_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (user, material, request) = approved_request(db, 100.0, 5.0, None).await?;
    let keeper = factory::create_user(db).await?;

    let completed = DeliveryService::new(db)
        .complete(keeper.id, request.id, Some(user.id))
        .await?;

    assert_eq!(completed.new_stock, 95.0);
    assert_eq!(completed.requested_by, user.id);
    assert_eq!(completed.delivery.status, DeliveryStatus::Completed);
    assert_eq!(completed.delivery.delivered_by, keeper.id);
    assert!(completed.delivery.delivery_date.is_some());

    let stored = entity::prelude::Material::find_by_id(material.id)
        .one(db)
        .await?
        .unwrap();
    assert_eq!(stored.stock_qty, 95.0);

    let movements = entity::prelude::StockMovement::find().all(db).await?;
    assert_eq!(movements.len(), 1);
    assert_eq!(movements[0].kind, MovementKind::Out);
    assert_eq!(movements[0].quantity, 5.0);
    assert_eq!(movements[0].reference_type, StockReference::Delivery);
    assert_eq!(movements[0].reference_id, Some(request.id));

    let request = entity::prelude::Request::find_by_id(request.id)
        .one(db)
        .await?
        .unwrap();
    assert_eq!(request.status, RequestStatus::Delivered);

    let notified = entity::prelude::Notification::find()
        .filter(entity::notification::Column::UserId.eq(user.id))
        .count(db)
        .await?;
    assert_eq!(notified, 1);

    Ok(())
}

/// Tests that a revised quantity takes precedence over the requested one.
///
/// Expected: 3 units deducted instead of 5
#[tokio::test]
async fn deducts_revised_quantity() -> Result<(), AppError> {
    let test = TestBuilder::new().with_request_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (user, _, request) = approved_request(db, 10.0, 5.0, Some(3.0)).await?;

    let completed = DeliveryService::new(db)
        .complete(user.id, request.id, None)
        .await?;

    assert_eq!(completed.new_stock, 7.0);

    Ok(())
}

/// Tests completing a request that is still pending.
///
/// Expected: Err(AppError::BadRequest) with nothing written
#[tokio::test]
async fn rejects_unapproved_request() -> Result<(), AppError> {
    let test = TestBuilder::new().with_request_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (user, _, _, request) = factory::helpers::create_request_with_dependencies(db).await?;

    let result = DeliveryService::new(db)
        .complete(user.id, request.id, None)
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));
    assert_eq!(entity::prelude::Delivery::find().count(db).await?, 0);

    Ok(())
}

/// Tests completing a request whose quantity exceeds the stock.
///
/// Expected: Err(AppError::BadRequest) and the stock untouched
#[tokio::test]
async fn rejects_insufficient_stock() -> Result<(), AppError> {
    let test = TestBuilder::new().with_request_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (user, material, request) = approved_request(db, 2.0, 5.0, None).await?;

    let result = DeliveryService::new(db)
        .complete(user.id, request.id, None)
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));

    let stored = entity::prelude::Material::find_by_id(material.id)
        .one(db)
        .await?
        .unwrap();
    assert_eq!(stored.stock_qty, 2.0);
    assert_eq!(entity::prelude::StockMovement::find().count(db).await?, 0);

    Ok(())
}

/// Tests completing the same request twice.
///
/// Expected: the second call fails and stock is deducted once
#[tokio::test]
async fn rejects_second_completion() -> Result<(), AppError> {
    let test = TestBuilder::new().with_request_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (user, material, request) = approved_request(db, 20.0, 5.0, None).await?;

    let service = DeliveryService::new(db);
    service.complete(user.id, request.id, None).await?;
    let second = service.complete(user.id, request.id, None).await;

    assert!(matches!(second, Err(AppError::BadRequest(_))));

    let stored = entity::prelude::Material::find_by_id(material.id)
        .one(db)
        .await?
        .unwrap();
    assert_eq!(stored.stock_qty, 15.0);

    Ok(())
}

/// Tests a delivery that leaves the material at or below its minimum.
///
/// Expected: warehouse users receive a low stock alert
#[tokio::test]
async fn alerts_warehouse_on_low_stock() -> Result<(), AppError> {
    let test = TestBuilder::new().with_request_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let keeper = factory::user::create_user_with_role(db, entity::enums::UserRole::Warehouse).await?;
    let (user, _, request) = approved_request(db, 6.0, 5.0, None).await?;

    DeliveryService::new(db)
        .complete(user.id, request.id, None)
        .await?;

    let alerts = entity::prelude::Notification::find()
        .filter(entity::notification::Column::UserId.eq(keeper.id))
        .filter(
            entity::notification::Column::Category
                .eq(entity::enums::NotificationCategory::StockLevel),
        )
        .count(db)
        .await?;
    assert_eq!(alerts, 1);

    Ok(())
}

/// Tests completion when the material stock changes between read and write.
///
/// Expected: Err(AppError::Conflict) with no delivery, no movement and the request
/// still approved
#[tokio::test]
async fn conflicting_stock_change_rolls_back() -> Result<(), AppError> {
    let test = TestBuilder::new().with_request_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, _, request) = approved_request(db, 100.0, 5.0, None).await?;
    let keeper = factory::create_user(db).await?;
    super::ignore_updates_of(db, "materials", "stock_qty").await?;

    let result = DeliveryService::new(db)
        .complete(keeper.id, request.id, None)
        .await;
    assert!(matches!(result, Err(AppError::Conflict(_))));

    assert_eq!(entity::prelude::Delivery::find().count(db).await?, 0);
    assert_eq!(entity::prelude::StockMovement::find().count(db).await?, 0);
    let stored = entity::prelude::Request::find_by_id(request.id)
        .one(db)
        .await?
        .unwrap();
    assert_eq!(stored.status, RequestStatus::Approved);

    Ok(())
}

/// Tests completion when the request leaves `approved` before it is marked delivered.
///
/// Expected: Err(AppError::Conflict) and the stock deduction rolled back
#[tokio::test]
async fn conflicting_request_change_rolls_back() -> Result<(), AppError> {
    let test = TestBuilder::new().with_request_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, material, request) = approved_request(db, 100.0, 5.0, None).await?;
    let keeper = factory::create_user(db).await?;
    super::ignore_updates_of(db, "requests", "status").await?;

    let result = DeliveryService::new(db)
        .complete(keeper.id, request.id, None)
        .await;
    assert!(matches!(result, Err(AppError::Conflict(_))));

    let stored = entity::prelude::Material::find_by_id(material.id)
        .one(db)
        .await?
        .unwrap();
    assert_eq!(stored.stock_qty, 100.0);
    assert_eq!(entity::prelude::Delivery::find().count(db).await?, 0);

    Ok(())
}
