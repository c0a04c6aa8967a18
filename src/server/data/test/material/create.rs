use super::*;

/// Tests creating a material with an existing unit of measure.
///
/// Expected: Ok with the material stored live and both stock figures kept
#[tokio::test]
async fn creates_material() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_material_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let uom = factory::create_uom(db).await?;

    let repo = MaterialRepository::new(db);
    let material = repo
        .create(CreateMaterialParams {
            code: "CEM-001".to_string(),
            name: "Portland cement".to_string(),
            description: Some("50 kg bag".to_string()),
            uom_id: uom.id,
            stock_qty: 40.0,
            min_stock_qty: 10.0,
        })
        .await?;

    assert_eq!(material.code, "CEM-001");
    assert_eq!(material.uom_id, uom.id);
    assert_eq!(material.stock_qty, 40.0);
    assert_eq!(material.min_stock_qty, 10.0);
    assert!(!material.is_low_stock());

    Ok(())
}

/// Tests that a code held by another live material is reported as taken.
///
/// Expected: taken for other materials, free when excluding the owner
#[tokio::test]
async fn detects_taken_code() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_material_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let uom = factory::create_uom(db).await?;
    let material = factory::material::MaterialFactory::new(db, uom.id)
        .code("STL-010")
        .build()
        .await?;

    let repo = MaterialRepository::new(db);

    assert!(repo.code_taken("STL-010", None).await?);
    assert!(!repo.code_taken("STL-010", Some(material.id)).await?);
    assert!(!repo.code_taken("STL-011", None).await?);

    Ok(())
}
