use super::*;

/// Tests that listing only returns the owner's notifications and honours `unread_only`.
///
/// Expected: other users' rows never appear; unread filter drops read rows
#[tokio::test]
async fn scopes_to_user_and_unread() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_user_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::create_user(db).await?;
    let other = factory::create_user(db).await?;
    factory::create_notification(db, owner.id).await?;
    factory::notification::NotificationFactory::new(db, owner.id)
        .is_read(true)
        .build()
        .await?;
    factory::create_notification(db, other.id).await?;

    let repo = NotificationRepository::new(db);
    let (_, all) = repo
        .get_paginated(owner.id, false, Pagination::default())
        .await?;
    let (unread, unread_total) = repo
        .get_paginated(owner.id, true, Pagination::default())
        .await?;

    assert_eq!(all, 2);
    assert_eq!(unread_total, 1);
    assert!(unread.iter().all(|n| !n.is_read && n.user_id == owner.id));
    assert_eq!(repo.count_unread(owner.id).await?, 1);

    Ok(())
}
