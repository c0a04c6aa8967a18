use super::*;
use crate::{
    model::inventory::QuantityOperation,
    server::{
        model::inventory::{CreateReserveParams, QuantityAdjustment},
        service::inventory::{InventoryItemService, InventoryReserveService},
    },
};
use entity::enums::{MovementKind, ReserveStatus};
use sea_orm::EntityTrait;

fn adjust(quantity: f64, operation: QuantityOperation) -> QuantityAdjustment {
    QuantityAdjustment {
        quantity,
        operation,
        note: None,
    }
}

/// Tests increasing an item's quantity.
///
/// Expected: quantity 10 -> 15 with one incoming audit transaction of 5
#[tokio::test]
async fn increases_quantity_and_records_transaction() -> Result<(), AppError> {
    let test = TestBuilder::new().with_inventory_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let item = factory::helpers::create_inventory_item_with_dependencies(db).await?;

    let updated = InventoryItemService::new(db)
        .update_quantity(user.id, item.id, adjust(5.0, QuantityOperation::Increase))
        .await?;

    assert_eq!(updated.quantity, 15.0);
    assert!(updated.material.is_some());

    let transactions = entity::prelude::InventoryTransaction::find().all(db).await?;
    assert_eq!(transactions.len(), 1);
    assert_eq!(transactions[0].kind, MovementKind::In);
    assert_eq!(transactions[0].quantity, 5.0);
    assert_eq!(transactions[0].before_quantity, 10.0);
    assert_eq!(transactions[0].after_quantity, 15.0);

    Ok(())
}

/// Tests setting the quantity to the value already stored.
///
/// Expected: Ok with no audit transaction written
#[tokio::test]
async fn unchanged_quantity_writes_no_transaction() -> Result<(), AppError> {
    let test = TestBuilder::new().with_inventory_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let item = factory::helpers::create_inventory_item_with_dependencies(db).await?;

    let updated = InventoryItemService::new(db)
        .update_quantity(user.id, item.id, adjust(10.0, QuantityOperation::Set))
        .await?;

    assert_eq!(updated.quantity, 10.0);
    assert!(entity::prelude::InventoryTransaction::find()
        .all(db)
        .await?
        .is_empty());

    Ok(())
}

/// Tests decreasing below zero.
///
/// Expected: Err(AppError::BadRequest) and the stored quantity untouched
#[tokio::test]
async fn rejects_negative_result() -> Result<(), AppError> {
    let test = TestBuilder::new().with_inventory_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let item = factory::helpers::create_inventory_item_with_dependencies(db).await?;

    let service = InventoryItemService::new(db);
    let result = service
        .update_quantity(user.id, item.id, adjust(11.0, QuantityOperation::Decrease))
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));
    assert_eq!(service.get_by_id(item.id).await?.quantity, 10.0);

    Ok(())
}

/// Tests reserving more than the free quantity.
///
/// Expected: Err(AppError::BadRequest) when 8 of 10 are already reserved
#[tokio::test]
async fn rejects_reserve_above_available() -> Result<(), AppError> {
    let test = TestBuilder::new().with_inventory_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let uom = factory::create_uom(db).await?;
    let material = factory::material::MaterialFactory::new(db, uom.id)
        .build()
        .await?;
    let warehouse = factory::create_warehouse(db).await?;
    let item = factory::inventory_item::InventoryItemFactory::new(
        db,
        material.id,
        warehouse.id,
        uom.id,
    )
    .reserved_quantity(8.0)
    .build()
    .await?;

    let result = InventoryReserveService::new(db)
        .create(CreateReserveParams {
            inventory_item_id: item.id,
            project_id: None,
            quantity: 3.0,
        })
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));

    Ok(())
}

/// Tests the reserve lifecycle through completion.
///
/// Expected: reserving raises reserved_quantity; completing consumes quantity and
/// releases the reservation
#[tokio::test]
async fn completing_reserve_consumes_quantity() -> Result<(), AppError> {
    let test = TestBuilder::new().with_inventory_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let item = factory::helpers::create_inventory_item_with_dependencies(db).await?;

    let reserves = InventoryReserveService::new(db);
    let items = InventoryItemService::new(db);

    let reserve = reserves
        .create(CreateReserveParams {
            inventory_item_id: item.id,
            project_id: None,
            quantity: 4.0,
        })
        .await?;
    assert_eq!(reserve.status, ReserveStatus::Active);
    assert_eq!(items.get_by_id(item.id).await?.reserved_quantity, 4.0);

    let completed = reserves
        .update_status(user.id, reserve.id, ReserveStatus::Completed)
        .await?;
    assert_eq!(completed.status, ReserveStatus::Completed);

    let after = items.get_by_id(item.id).await?;
    assert_eq!(after.quantity, 6.0);
    assert_eq!(after.reserved_quantity, 0.0);

    let again = reserves
        .update_status(user.id, reserve.id, ReserveStatus::Cancelled)
        .await;
    assert!(matches!(again, Err(AppError::BadRequest(_))));

    Ok(())
}

/// Tests cancelling a reserve.
///
/// Expected: the reservation is released and the quantity left untouched
#[tokio::test]
async fn cancelling_reserve_releases_quantity() -> Result<(), AppError> {
    let test = TestBuilder::new().with_inventory_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let item = factory::helpers::create_inventory_item_with_dependencies(db).await?;

    let reserves = InventoryReserveService::new(db);
    let reserve = reserves
        .create(CreateReserveParams {
            inventory_item_id: item.id,
            project_id: None,
            quantity: 2.5,
        })
        .await?;

    reserves
        .update_status(user.id, reserve.id, ReserveStatus::Cancelled)
        .await?;

    let after = InventoryItemService::new(db).get_by_id(item.id).await?;
    assert_eq!(after.quantity, 10.0);
    assert_eq!(after.reserved_quantity, 0.0);
    assert!(entity::prelude::InventoryTransaction::find()
        .all(db)
        .await?
        .is_empty());

    Ok(())
}

/// Tests a quantity update whose guarded write no longer matches the stored quantity.
///
/// Expected: Err(AppError::Conflict) and no audit transaction recorded
#[tokio::test]
async fn conflicting_quantity_update_is_rejected() -> Result<(), AppError> {
    let test = TestBuilder::new().with_inventory_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let item = factory::helpers::create_inventory_item_with_dependencies(db).await?;
    super::ignore_updates_of(db, "inventory_items", "quantity").await?;

    let result = InventoryItemService::new(db)
        .update_quantity(user.id, item.id, adjust(5.0, QuantityOperation::Increase))
        .await;

    assert!(matches!(result, Err(AppError::Conflict(_))));

    let transactions = entity::prelude::InventoryTransaction::find().all(db).await?;
    assert!(transactions.is_empty());

    Ok(())
}
