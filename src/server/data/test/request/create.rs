use super::*;

/// Tests that new requests start out pending without a revised quantity.
///
/// Expected: Ok with status pending and revised_qty None
#[tokio::test]
async fn creates_pending_request() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_request_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (user, project, material, _) =
        factory::helpers::create_request_with_dependencies(db).await?;

    let request = RequestRepository::new(db)
        .create(CreateRequestParams {
            requested_by: user.id,
            material_id: material.id,
            project_id: project.id,
            requested_qty: 12.5,
            request_note: Some("for level 3 slab".to_string()),
        })
        .await?;

    assert_eq!(request.status, RequestStatus::Pending);
    assert_eq!(request.requested_qty, 12.5);
    assert!(request.revised_qty.is_none());
    assert_eq!(request.request_note.as_deref(), Some("for level 3 slab"));

    Ok(())
}
