use super::*;

/// Tests creating a user and reading back the stored credentials.
///
/// Expected: Ok with the hash retrievable by username but not part of the model
#[tokio::test]
async fn creates_user_with_credentials() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    let user = repo
        .create(CreateUserParams {
            username: "keeper".to_string(),
            email: "keeper@example.com".to_string(),
            password_hash: "$2b$04$hash".to_string(),
            full_name: "Store Keeper".to_string(),
            role: UserRole::Warehouse,
            phone: None,
            is_active: true,
        })
        .await?;

    assert_eq!(user.username, "keeper");
    assert_eq!(user.role, UserRole::Warehouse);
    assert!(user.last_login.is_none());

    let (found, hash) = repo
        .find_credentials_by_username("keeper")
        .await?
        .unwrap();
    assert_eq!(found.id, user.id);
    assert_eq!(hash, "$2b$04$hash");

    Ok(())
}

/// Tests that a duplicate username is rejected by the unique index.
///
/// Expected: Err(DbErr)
#[tokio::test]
async fn rejects_duplicate_username() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let existing = factory::create_user(db).await?;

    let result = UserRepository::new(db)
        .create(CreateUserParams {
            username: existing.username.clone(),
            email: "someone-else@example.com".to_string(),
            password_hash: "!".to_string(),
            full_name: "Someone Else".to_string(),
            role: UserRole::Engineer,
            phone: None,
            is_active: true,
        })
        .await;

    assert!(result.is_err());

    Ok(())
}
