use super::*;
use crate::server::{model::user::UpdateUserParams, service::user::UserService};
use entity::enums::UserRole;

/// Tests an admin deleting their own account.
///
/// Expected: Err(AppError::BadRequest) and the account kept
#[tokio::test]
async fn admin_cannot_delete_self() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = factory::user::create_user_with_role(db, UserRole::Admin).await?;
    let service = UserService::new(db);

    let result = service.delete(admin.id, admin.id).await;
    assert!(matches!(result, Err(AppError::BadRequest(_))));

    assert_eq!(service.get_by_id(admin.id).await?.id, admin.id);

    Ok(())
}

/// Tests an admin deleting another account, then deleting it again.
///
/// Expected: Ok, then Err(AppError::NotFound)
#[tokio::test]
async fn deletes_other_user() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = factory::user::create_user_with_role(db, UserRole::Admin).await?;
    let engineer = factory::create_user(db).await?;
    let service = UserService::new(db);

    service.delete(admin.id, engineer.id).await?;

    let again = service.delete(admin.id, engineer.id).await;
    assert!(matches!(again, Err(AppError::NotFound(_))));

    Ok(())
}

/// Tests renaming a user to a username another account already holds.
///
/// Expected: Err(AppError::BadRequest)
#[tokio::test]
async fn rejects_taken_username_on_update() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let first = factory::user::UserFactory::new(db)
        .username("first")
        .build()
        .await?;
    let second = factory::create_user(db).await?;

    let result = UserService::new(db)
        .update(
            second.id,
            UpdateUserParams {
                username: Some(first.username),
                ..Default::default()
            },
        )
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));

    Ok(())
}
