use super::*;

fn params(
    item: &entity::inventory_item::Model,
    user_id: i32,
    before: f64,
    after: f64,
) -> RecordTransactionParams {
    RecordTransactionParams {
        user_id,
        inventory_item_id: item.id,
        material_id: item.material_id,
        warehouse_id: item.warehouse_id,
        uom_id: item.uom_id,
        action: "qty_update".to_string(),
        before_quantity: before,
        after_quantity: after,
        note: None,
    }
}

/// Tests that the direction and absolute quantity are derived from before and after.
///
/// Expected: an increase is `in`, a decrease is `out`, quantity is always positive
#[tokio::test]
async fn derives_kind_and_quantity() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_inventory_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let item = factory::helpers::create_inventory_item_with_dependencies(db).await?;

    let repo = InventoryTransactionRepository::new(db);
    let incoming = repo.record(params(&item, user.id, 10.0, 14.0)).await?;
    let outgoing = repo.record(params(&item, user.id, 14.0, 9.5)).await?;

    assert_eq!(incoming.kind, MovementKind::In);
    assert_eq!(incoming.quantity, 4.0);
    assert_eq!(outgoing.kind, MovementKind::Out);
    assert_eq!(outgoing.quantity, 4.5);

    Ok(())
}

/// Tests filtering the audit trail by kind.
///
/// Expected: only transactions of the requested kind
#[tokio::test]
async fn filters_by_kind() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_inventory_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let item = factory::helpers::create_inventory_item_with_dependencies(db).await?;

    let repo = InventoryTransactionRepository::new(db);
    repo.record(params(&item, user.id, 10.0, 12.0)).await?;
    repo.record(params(&item, user.id, 12.0, 11.0)).await?;
    repo.record(params(&item, user.id, 11.0, 15.0)).await?;

    let filter = InventoryTransactionFilter {
        inventory_item_id: Some(item.id),
        kind: Some(MovementKind::In),
        ..Default::default()
    };
    let (transactions, total) = repo.get_paginated(&filter, Pagination::default()).await?;

    assert_eq!(total, 2);
    assert!(transactions.iter().all(|t| t.kind == MovementKind::In));

    Ok(())
}
