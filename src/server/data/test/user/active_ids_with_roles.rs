use super::*;

/// Tests selecting notification recipients by role.
///
/// Expected: active users with one of the roles; inactive users skipped
#[tokio::test]
async fn selects_active_users_with_roles() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = factory::user::create_user_with_role(db, UserRole::Admin).await?;
    let keeper = factory::user::create_user_with_role(db, UserRole::Warehouse).await?;
    factory::user::UserFactory::new(db)
        .role(UserRole::Warehouse)
        .is_active(false)
        .build()
        .await?;
    factory::user::create_user_with_role(db, UserRole::Engineer).await?;

    let mut ids = UserRepository::new(db)
        .active_ids_with_roles(&[UserRole::Admin, UserRole::Warehouse])
        .await?;
    ids.sort();

    let mut expected = vec![admin.id, keeper.id];
    expected.sort();
    assert_eq!(ids, expected);

    Ok(())
}
