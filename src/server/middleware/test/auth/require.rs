use super::*;

/// Tests that a valid token for a permitted role passes the guard.
///
/// Expected: Ok(User) for the token subject
#[tokio::test]
async fn grants_access_to_permitted_role() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let jwt = keys();

    let user = factory::user::create_user_with_role(db, UserRole::Warehouse).await?;
    let token = BearerToken::Present(jwt.issue(user.id, user.role)?);

    let returned = AuthGuard::new(db, &jwt, &token)
        .require(&[Permission::ManageStock, Permission::ViewReports])
        .await?;

    assert_eq!(returned.id, user.id);

    Ok(())
}

/// Tests that an empty permission list accepts any authenticated user.
///
/// Expected: Ok(User) for a contractor
#[tokio::test]
async fn empty_permission_list_grants_access() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let jwt = keys();

    let user = factory::user::create_user_with_role(db, UserRole::Contractor).await?;
    let token = BearerToken::Present(jwt.issue(user.id, user.role)?);

    let result = AuthGuard::new(db, &jwt, &token).require(&[]).await;

    assert!(result.is_ok());

    Ok(())
}

/// Tests that failing any one of several permissions denies access.
///
/// Expected: Err(AuthError::InsufficientPermissions)
#[tokio::test]
async fn denies_when_any_permission_missing() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let jwt = keys();

    let user = factory::user::create_user_with_role(db, UserRole::Engineer).await?;
    let token = BearerToken::Present(jwt.issue(user.id, user.role)?);

    let result = AuthGuard::new(db, &jwt, &token)
        .require(&[Permission::Engineering, Permission::ManageStock])
        .await;

    match result {
        Err(AppError::AuthErr(AuthError::InsufficientPermissions(id))) => assert_eq!(id, user.id),
        other => panic!("Expected InsufficientPermissions, got: {:?}", other.map(|u| u.id)),
    }

    Ok(())
}

/// Tests missing and malformed headers.
///
/// Expected: MissingToken and InvalidTokenFormat respectively, before any lookup
#[tokio::test]
async fn rejects_missing_and_malformed_tokens() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let jwt = keys();

    let missing = AuthGuard::new(db, &jwt, &BearerToken::Missing)
        .require(&[])
        .await;
    assert!(matches!(
        missing,
        Err(AppError::AuthErr(AuthError::MissingToken))
    ));

    let malformed = AuthGuard::new(db, &jwt, &BearerToken::Malformed)
        .require(&[])
        .await;
    assert!(matches!(
        malformed,
        Err(AppError::AuthErr(AuthError::InvalidTokenFormat))
    ));

    Ok(())
}

/// Tests tokens signed with another secret and tokens past their expiry.
///
/// Expected: InvalidToken and TokenExpired respectively
#[tokio::test]
async fn rejects_foreign_and_expired_tokens() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let jwt = keys();

    let user = factory::user::create_user_with_role(db, UserRole::Admin).await?;

    let foreign = BearerToken::Present(JwtKeys::new("other-secret", 3600).issue(user.id, user.role)?);
    let result = AuthGuard::new(db, &jwt, &foreign).require(&[]).await;
    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::InvalidToken))
    ));

    let expired = BearerToken::Present(JwtKeys::new("test-secret", -3600).issue(user.id, user.role)?);
    let result = AuthGuard::new(db, &jwt, &expired).require(&[]).await;
    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::TokenExpired))
    ));

    Ok(())
}

/// Tests that deactivated accounts are rejected even with a valid token.
///
/// Expected: Err(AuthError::UserNotFound)
#[tokio::test]
async fn rejects_inactive_user() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let jwt = keys();

    let user = factory::user::UserFactory::new(db)
        .role(UserRole::Admin)
        .is_active(false)
        .build()
        .await?;
    let token = BearerToken::Present(jwt.issue(user.id, user.role)?);

    let result = AuthGuard::new(db, &jwt, &token).require(&[]).await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::UserNotFound(_)))
    ));

    Ok(())
}
