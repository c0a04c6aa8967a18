use super::*;

/// Tests moving a pending request to approved.
///
/// Expected: one row affected and the new status persisted
#[tokio::test]
async fn transitions_from_expected_status() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_request_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, _, _, request) = factory::helpers::create_request_with_dependencies(db).await?;

    let repo = RequestRepository::new(db);
    let affected = repo
        .transition_status(request.id, RequestStatus::Pending, RequestStatus::Approved)
        .await?;
    assert_eq!(affected, 1);

    let stored = repo.find_by_id(request.id).await?.unwrap();
    assert_eq!(stored.status, RequestStatus::Approved);

    Ok(())
}

/// Tests a second decision on a request that already left pending.
///
/// Expected: no row affected and the first decision kept
#[tokio::test]
async fn ignores_request_in_other_status() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_request_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, _, _, request) = factory::helpers::create_request_with_dependencies(db).await?;

    let repo = RequestRepository::new(db);
    repo.transition_status(request.id, RequestStatus::Pending, RequestStatus::Approved)
        .await?;
    let affected = repo
        .transition_status(request.id, RequestStatus::Pending, RequestStatus::Rejected)
        .await?;
    assert_eq!(affected, 0);

    let stored = repo.find_by_id(request.id).await?.unwrap();
    assert_eq!(stored.status, RequestStatus::Approved);

    Ok(())
}

/// Tests a transition on a request that does not exist.
///
/// Expected: no row affected
#[tokio::test]
async fn ignores_missing_request() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_request_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let affected = RequestRepository::new(db)
        .transition_status(999, RequestStatus::Pending, RequestStatus::Rejected)
        .await?;

    assert_eq!(affected, 0);

    Ok(())
}
