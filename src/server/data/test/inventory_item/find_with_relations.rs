use super::*;

/// Tests that an item is returned with material, warehouse and unit summaries.
///
/// Expected: Ok(Some) with all three summaries filled from the referenced rows
#[tokio::test]
async fn attaches_relation_summaries() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_inventory_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let item = factory::helpers::create_inventory_item_with_dependencies(db).await?;

    let found = InventoryItemRepository::new(db)
        .find_with_relations(item.id)
        .await?
        .unwrap();

    assert_eq!(found.id, item.id);
    assert_eq!(found.material.as_ref().map(|m| m.id), Some(item.material_id));
    assert_eq!(found.warehouse.as_ref().map(|w| w.id), Some(item.warehouse_id));
    assert_eq!(found.uom.as_ref().map(|u| u.id), Some(item.uom_id));

    Ok(())
}

/// Tests that a missing item yields None rather than an error.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_missing_item() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_inventory_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let found = InventoryItemRepository::new(db)
        .find_with_relations(404)
        .await?;

    assert!(found.is_none());

    Ok(())
}

/// Tests that listing pages through items and reports relation summaries.
///
/// Expected: total counts every live item
#[tokio::test]
async fn paginates_items() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_inventory_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    for _ in 0..3 {
        factory::helpers::create_inventory_item_with_dependencies(db).await?;
    }

    let (items, total) = InventoryItemRepository::new(db)
        .get_paginated(None, Pagination::new(Some(1), Some(2)))
        .await?;

    assert_eq!(total, 3);
    assert_eq!(items.len(), 2);
    assert!(items.iter().all(|i| i.material.is_some()));

    Ok(())
}
