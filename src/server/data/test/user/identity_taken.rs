use super::*;

/// Tests the username and email uniqueness check.
///
/// Expected: either column matching counts as taken; the excluded user is ignored
#[tokio::test]
async fn detects_taken_username_or_email() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::UserFactory::new(db)
        .username("alice")
        .email("alice@example.com")
        .build()
        .await?;

    let repo = UserRepository::new(db);

    assert!(repo.identity_taken(Some("alice"), None, None).await?);
    assert!(
        repo.identity_taken(Some("bob"), Some("alice@example.com"), None)
            .await?
    );
    assert!(
        !repo
            .identity_taken(Some("alice"), Some("alice@example.com"), Some(user.id))
            .await?
    );
    assert!(!repo.identity_taken(None, None, None).await?);

    Ok(())
}
