use super::*;

/// Tests writing quantity and reserved quantity together.
///
/// Expected: both columns updated when both expected values hold
#[tokio::test]
async fn updates_both_levels() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_inventory_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let item = factory::helpers::create_inventory_item_with_dependencies(db).await?;

    let repo = InventoryItemRepository::new(db);
    let affected = repo
        .set_levels_if_unchanged(
            item.id,
            ItemLevels {
                quantity: 10.0,
                reserved_quantity: 0.0,
            },
            ItemLevels {
                quantity: 10.0,
                reserved_quantity: 4.0,
            },
        )
        .await?;

    assert_eq!(affected, 1);
    let stored = repo.find_by_id(item.id).await?.unwrap();
    assert_eq!(stored.quantity, 10.0);
    assert_eq!(stored.reserved_quantity, 4.0);

    Ok(())
}

/// Tests that a mismatch on the reserved quantity alone blocks the write.
///
/// Expected: zero rows affected
#[tokio::test]
async fn skips_when_reserved_changed() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_inventory_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let item = factory::helpers::create_inventory_item_with_dependencies(db).await?;

    let affected = InventoryItemRepository::new(db)
        .set_levels_if_unchanged(
            item.id,
            ItemLevels {
                quantity: 10.0,
                reserved_quantity: 1.0,
            },
            ItemLevels {
                quantity: 10.0,
                reserved_quantity: 5.0,
            },
        )
        .await?;

    assert_eq!(affected, 0);

    Ok(())
}
