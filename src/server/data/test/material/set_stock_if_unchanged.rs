use super::*;

/// Tests the conditional stock write when the expected value still holds.
///
/// Expected: one row affected and the new stock stored
#[tokio::test]
async fn updates_when_stock_matches() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_material_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let uom = factory::create_uom(db).await?;
    let material = factory::material::MaterialFactory::new(db, uom.id)
        .stock_qty(20.0)
        .build()
        .await?;

    let repo = MaterialRepository::new(db);
    let affected = repo.set_stock_if_unchanged(material.id, 20.0, 12.5).await?;

    assert_eq!(affected, 1);
    let stored = repo.find_by_id(material.id).await?.unwrap();
    assert_eq!(stored.stock_qty, 12.5);

    Ok(())
}

/// Tests that a stale expected value leaves the row untouched.
///
/// Expected: zero rows affected and the stock unchanged
#[tokio::test]
async fn skips_when_stock_changed() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_material_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let uom = factory::create_uom(db).await?;
    let material = factory::material::MaterialFactory::new(db, uom.id)
        .stock_qty(20.0)
        .build()
        .await?;

    let repo = MaterialRepository::new(db);
    let affected = repo.set_stock_if_unchanged(material.id, 19.0, 0.0).await?;

    assert_eq!(affected, 0);
    let stored = repo.find_by_id(material.id).await?.unwrap();
    assert_eq!(stored.stock_qty, 20.0);

    Ok(())
}
