use super::*;

/// Tests that a soft deleted material disappears from reads and lists.
///
/// Expected: first delete succeeds, second reports nothing to delete
#[tokio::test]
async fn hides_deleted_material() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_material_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let material = factory::create_material(db).await?;

    let repo = MaterialRepository::new(db);
    assert!(repo.soft_delete(material.id).await?);
    assert!(!repo.soft_delete(material.id).await?);

    assert!(repo.find_by_id(material.id).await?.is_none());
    let (_, total) = repo
        .get_paginated(&MaterialFilter::default(), Pagination::default())
        .await?;
    assert_eq!(total, 0);

    Ok(())
}

/// Tests that a deleted material keeps its code reserved, matching the unique index.
///
/// Expected: code still reported as taken
#[tokio::test]
async fn deleted_material_keeps_code_reserved() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_material_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let uom = factory::create_uom(db).await?;
    let material = factory::material::MaterialFactory::new(db, uom.id)
        .code("OLD-1")
        .build()
        .await?;

    let repo = MaterialRepository::new(db);
    repo.soft_delete(material.id).await?;

    assert!(repo.code_taken("OLD-1", None).await?);

    Ok(())
}
