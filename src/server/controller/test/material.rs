use super::*;

fn material_body(code: &str, uom_id: i32) -> Value {
    json!({
        "code": code,
        "name": format!("Material {}", code),
        "uom_id": uom_id,
        "stock_qty": 10.0,
        "min_stock_qty": 2.0
    })
}

/// Tests validation failures on material creation.
///
/// Expected: 400 with a `details` entry naming the short code
#[tokio::test]
async fn rejects_invalid_material() {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let app = app(db, dir.path());

    let admin = token_for(db, UserRole::Admin).await;
    let uom = factory::create_uom(db).await.unwrap();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/materials",
        Some(&admin),
        Some(material_body("X", uom.id)),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Validation failed");
    assert_eq!(body["details"][0]["field"], "code");
}

/// Tests page metadata on the material list.
///
/// Expected: second page of size 2 holds the last of 3 materials
#[tokio::test]
async fn paginates_materials() {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let app = app(db, dir.path());

    let admin = token_for(db, UserRole::Admin).await;
    let uom = factory::create_uom(db).await.unwrap();
    for code in ["CEM-001", "CEM-002", "CEM-003"] {
        let (status, _) = send(
            &app,
            Method::POST,
            "/api/materials",
            Some(&admin),
            Some(material_body(code, uom.id)),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/materials?page=2&per_page=2&sort=code:asc",
        Some(&admin),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"][0]["code"], "CEM-003");
    assert_eq!(body["meta"]["total"], 3);
    assert_eq!(body["meta"]["page"], 2);
    assert_eq!(body["meta"]["total_pages"], 2);
}

/// Tests that a cached list is evicted by a successful write.
///
/// Expected: the second list call sees the material created in between
#[tokio::test]
async fn writes_evict_cached_lists() {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let app = app(db, dir.path());

    let admin = token_for(db, UserRole::Admin).await;
    let uom = factory::create_uom(db).await.unwrap();

    let (_, before) = send(&app, Method::GET, "/api/materials", Some(&admin), None).await;
    assert_eq!(before["meta"]["total"], 0);

    send(
        &app,
        Method::POST,
        "/api/materials",
        Some(&admin),
        Some(material_body("SAND-01", uom.id)),
    )
    .await;

    let (_, after) = send(&app, Method::GET, "/api/materials", Some(&admin), None).await;
    assert_eq!(after["meta"]["total"], 1);
}

/// Tests reading a material after deleting it.
///
/// Expected: delete succeeds, then the material is 404
#[tokio::test]
async fn deleted_material_is_not_found() {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let app = app(db, dir.path());

    let admin = token_for(db, UserRole::Admin).await;
    let uom = factory::create_uom(db).await.unwrap();

    let (_, created) = send(
        &app,
        Method::POST,
        "/api/materials",
        Some(&admin),
        Some(material_body("GRAV-01", uom.id)),
    )
    .await;
    let uri = format!("/api/materials/{}", created["data"]["id"]);

    let (status, _) = send(&app, Method::DELETE, &uri, Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, Method::GET, &uri, Some(&admin), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Material not found");
}

/// Tests stock updates by a warehouse user.
///
/// Expected: 200 with the new stock; an engineer gets 403
#[tokio::test]
async fn warehouse_updates_stock() {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let app = app(db, dir.path());

    let keeper = token_for(db, UserRole::Warehouse).await;
    let engineer = token_for(db, UserRole::Engineer).await;
    let material = factory::create_material(db).await.unwrap();
    let uri = format!("/api/materials/{}/stock", material.id);

    let (status, _) = send(
        &app,
        Method::PATCH,
        &uri,
        Some(&engineer),
        Some(json!({ "stock_qty": 5.0 })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(
        &app,
        Method::PATCH,
        &uri,
        Some(&keeper),
        Some(json!({ "stock_qty": 5.0, "notes": "recount" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["stock_qty"], 5.0);
}

/// Tests a page number far past the end of the list.
///
/// Expected: 200 with an empty page instead of an offset overflow
#[tokio::test]
async fn huge_page_returns_empty_list() {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let app = app(db, dir.path());

    let admin = token_for(db, UserRole::Admin).await;

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/materials?page=18446744073709551615&per_page=100",
        Some(&admin),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["data"].as_array().unwrap().is_empty());
}
