use super::*;

/// Tests searching users across username, email and full name.
///
/// Expected: only matching users, counted in the total
#[tokio::test]
async fn searches_users() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::user::UserFactory::new(db)
        .full_name("Maria Kowalski")
        .build()
        .await?;
    factory::create_user(db).await?;
    factory::create_user(db).await?;

    let repo = UserRepository::new(db);
    let (users, total) = repo
        .get_paginated(Some("Kowalski"), Pagination::default())
        .await?;

    assert_eq!(total, 1);
    assert_eq!(users[0].full_name, "Maria Kowalski");

    let (_, everyone) = repo.get_paginated(None, Pagination::default()).await?;
    assert_eq!(everyone, 3);

    Ok(())
}
