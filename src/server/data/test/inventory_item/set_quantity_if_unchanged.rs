use super::*;

/// Tests the conditional quantity write with a matching expected value.
///
/// Expected: one row affected and the new quantity stored
#[tokio::test]
async fn updates_when_quantity_matches() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_inventory_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let item = factory::helpers::create_inventory_item_with_dependencies(db).await?;

    let repo = InventoryItemRepository::new(db);
    let affected = repo
        .set_quantity_if_unchanged(item.id, item.quantity, 7.0)
        .await?;

    assert_eq!(affected, 1);
    assert_eq!(repo.find_by_id(item.id).await?.unwrap().quantity, 7.0);

    Ok(())
}

/// Tests that a stale read loses: the row is left alone.
///
/// Expected: zero rows affected
#[tokio::test]
async fn skips_when_quantity_changed() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_inventory_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let item = factory::helpers::create_inventory_item_with_dependencies(db).await?;

    let repo = InventoryItemRepository::new(db);
    repo.set_quantity_if_unchanged(item.id, item.quantity, 8.0)
        .await?;
    let affected = repo
        .set_quantity_if_unchanged(item.id, item.quantity, 3.0)
        .await?;

    assert_eq!(affected, 0);
    assert_eq!(repo.find_by_id(item.id).await?.unwrap().quantity, 8.0);

    Ok(())
}
