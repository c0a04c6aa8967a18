use super::*;

/// Tests the default listing: newest first with page metadata totals.
///
/// Expected: Ok with the requested page and the total across all pages
#[tokio::test]
async fn paginates_materials() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_material_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let uom = factory::create_uom(db).await?;
    for _ in 0..5 {
        factory::material::MaterialFactory::new(db, uom.id)
            .build()
            .await?;
    }

    let repo = MaterialRepository::new(db);
    let (page, total) = repo
        .get_paginated(&MaterialFilter::default(), Pagination::new(Some(2), Some(2)))
        .await?;

    assert_eq!(total, 5);
    assert_eq!(page.len(), 2);

    Ok(())
}

/// Tests the low stock filter against each material's own minimum.
///
/// Expected: only materials with stock at or below their minimum
#[tokio::test]
async fn filters_low_stock() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_material_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let uom = factory::create_uom(db).await?;
    let at_minimum = factory::material::MaterialFactory::new(db, uom.id)
        .stock_qty(5.0)
        .min_stock_qty(5.0)
        .build()
        .await?;
    factory::material::MaterialFactory::new(db, uom.id)
        .stock_qty(50.0)
        .min_stock_qty(5.0)
        .build()
        .await?;

    let filter = MaterialFilter {
        low_stock: true,
        ..Default::default()
    };
    let (page, total) = MaterialRepository::new(db)
        .get_paginated(&filter, Pagination::default())
        .await?;

    assert_eq!(total, 1);
    assert_eq!(page[0].id, at_minimum.id);

    Ok(())
}

/// Tests search over code and name combined with ascending stock sort.
///
/// Expected: matching materials ordered by stock
#[tokio::test]
async fn searches_and_sorts() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_material_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let uom = factory::create_uom(db).await?;
    factory::material::MaterialFactory::new(db, uom.id)
        .code("PIPE-20")
        .stock_qty(30.0)
        .build()
        .await?;
    factory::material::MaterialFactory::new(db, uom.id)
        .code("PIPE-32")
        .stock_qty(10.0)
        .build()
        .await?;
    factory::material::MaterialFactory::new(db, uom.id)
        .code("VALVE-1")
        .build()
        .await?;

    let filter = MaterialFilter {
        search: Some("PIPE".to_string()),
        sort: Sort {
            field: MaterialSortField::StockQty,
            descending: false,
        },
        ..Default::default()
    };
    let (page, total) = MaterialRepository::new(db)
        .get_paginated(&filter, Pagination::default())
        .await?;

    assert_eq!(total, 2);
    assert_eq!(page[0].code, "PIPE-32");
    assert_eq!(page[1].code, "PIPE-20");

    Ok(())
}
