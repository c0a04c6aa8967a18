use super::*;

/// Tests editing a pending request.
///
/// Expected: revised quantity and note stored
#[tokio::test]
async fn edits_pending_request() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_request_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, _, _, request) = factory::helpers::create_request_with_dependencies(db).await?;

    let repo = RequestRepository::new(db);
    let affected = repo
        .update_if_pending(
            request.id,
            UpdateRequestParams {
                revised_qty: Some(4.0),
                request_note: Some("split delivery".to_string()),
            },
        )
        .await?;
    assert_eq!(affected, 1);

    let stored = repo.find_by_id(request.id).await?.unwrap();
    assert_eq!(stored.revised_qty, Some(4.0));
    assert_eq!(stored.request_note.as_deref(), Some("split delivery"));

    Ok(())
}

/// Tests editing a request that was already approved.
///
/// Expected: no row affected and the quantity left untouched
#[tokio::test]
async fn skips_decided_request() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_request_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, _, _, request) = factory::helpers::create_request_with_dependencies(db).await?;

    let repo = RequestRepository::new(db);
    repo.transition_status(request.id, RequestStatus::Pending, RequestStatus::Approved)
        .await?;

    let affected = repo
        .update_if_pending(
            request.id,
            UpdateRequestParams {
                revised_qty: Some(4.0),
                request_note: None,
            },
        )
        .await?;
    assert_eq!(affected, 0);

    let stored = repo.find_by_id(request.id).await?.unwrap();
    assert!(stored.revised_qty.is_none());

    Ok(())
}
