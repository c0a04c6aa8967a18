use super::*;
use crate::server::{
    model::request::{CreateRequestParams, UpdateRequestParams},
    service::request::RequestService,
};
use entity::enums::{NotificationCategory, RequestStatus};
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};

/// Tests approving a pending request.
///
/// Expected: status approved and one request status notification for the requester
#[tokio::test]
async fn approves_pending_request() -> Result<(), AppError> {
    let test = TestBuilder::new().with_request_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (user, _, _, request) = factory::helpers::create_request_with_dependencies(db).await?;

    let approved = RequestService::new(db)
        .update_status(request.id, RequestStatus::Approved)
        .await?;

    assert_eq!(approved.status, RequestStatus::Approved);

    let notified = entity::prelude::Notification::find()
        .filter(entity::notification::Column::UserId.eq(user.id))
        .filter(entity::notification::Column::Category.eq(NotificationCategory::RequestStatus))
        .count(db)
        .await?;
    assert_eq!(notified, 1);

    Ok(())
}

/// Tests the transitions the status endpoint refuses.
///
/// Expected: BadRequest for `delivered`, and for deciding an already decided request
#[tokio::test]
async fn rejects_invalid_transitions() -> Result<(), AppError> {
    let test = TestBuilder::new().with_request_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, _, _, request) = factory::helpers::create_request_with_dependencies(db).await?;
    let service = RequestService::new(db);

    let delivered = service
        .update_status(request.id, RequestStatus::Delivered)
        .await;
    assert!(matches!(delivered, Err(AppError::BadRequest(_))));

    service
        .update_status(request.id, RequestStatus::Rejected)
        .await?;
    let again = service
        .update_status(request.id, RequestStatus::Approved)
        .await;
    assert!(matches!(again, Err(AppError::BadRequest(_))));

    Ok(())
}

/// Tests raising a request against a project that does not exist.
///
/// Expected: Err(AppError::NotFound)
#[tokio::test]
async fn rejects_unknown_project() -> Result<(), AppError> {
    let test = TestBuilder::new().with_request_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (user, _, material, _) = factory::helpers::create_request_with_dependencies(db).await?;

    let result = RequestService::new(db)
        .create(CreateRequestParams {
            requested_by: user.id,
            material_id: material.id,
            project_id: 999,
            requested_qty: 1.0,
            request_note: None,
        })
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));

    Ok(())
}

/// Tests a decision whose guarded status write finds the request no longer pending.
///
/// Expected: Err(AppError::Conflict) and no notification sent
#[tokio::test]
async fn conflicting_decision_is_rejected() -> Result<(), AppError> {
    let test = TestBuilder::new().with_request_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (user, _, _, request) = factory::helpers::create_request_with_dependencies(db).await?;
    super::ignore_updates_of(db, "requests", "status").await?;

    let result = RequestService::new(db)
        .update_status(request.id, RequestStatus::Approved)
        .await;
    assert!(matches!(result, Err(AppError::Conflict(_))));

    let notified = entity::prelude::Notification::find()
        .filter(entity::notification::Column::UserId.eq(user.id))
        .count(db)
        .await?;
    assert_eq!(notified, 0);

    Ok(())
}

/// Tests editing a request after it was decided.
///
/// Expected: Err(AppError::BadRequest) and the revised quantity left unset
#[tokio::test]
async fn rejects_edit_of_decided_request() -> Result<(), AppError> {
    let test = TestBuilder::new().with_request_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, _, _, request) = factory::helpers::create_request_with_dependencies(db).await?;
    let service = RequestService::new(db);

    service
        .update_status(request.id, RequestStatus::Rejected)
        .await?;
    let result = service
        .update(
            request.id,
            UpdateRequestParams {
                revised_qty: Some(2.0),
                request_note: None,
            },
        )
        .await;
    assert!(matches!(result, Err(AppError::BadRequest(_))));

    assert!(service.get_by_id(request.id).await?.revised_qty.is_none());

    Ok(())
}
