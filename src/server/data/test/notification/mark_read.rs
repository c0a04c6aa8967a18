use super::*;

/// Tests marking a notification read, including the read timestamp.
///
/// Expected: Some with `is_read` set and `read_at` filled
#[tokio::test]
async fn marks_own_notification_read() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_user_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let notification = factory::create_notification(db, user.id).await?;

    let read = NotificationRepository::new(db)
        .mark_read(notification.id, user.id)
        .await?
        .unwrap();

    assert!(read.is_read);
    assert!(read.read_at.is_some());

    Ok(())
}

/// Tests that another user's notification cannot be marked read.
///
/// Expected: Ok(None) and the notification stays unread
#[tokio::test]
async fn ignores_other_users_notification() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_user_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::create_user(db).await?;
    let intruder = factory::create_user(db).await?;
    let notification = factory::create_notification(db, owner.id).await?;

    let repo = NotificationRepository::new(db);
    let result = repo.mark_read(notification.id, intruder.id).await?;

    assert!(result.is_none());
    assert_eq!(repo.count_unread(owner.id).await?, 1);

    Ok(())
}

/// Tests the bulk variant only touches the caller's unread rows.
///
/// Expected: count equals the caller's unread notifications
#[tokio::test]
async fn marks_all_read_for_user() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_user_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let other = factory::create_user(db).await?;
    factory::create_notification(db, user.id).await?;
    factory::create_notification(db, user.id).await?;
    factory::notification::NotificationFactory::new(db, user.id)
        .is_read(true)
        .build()
        .await?;
    factory::create_notification(db, other.id).await?;

    let repo = NotificationRepository::new(db);
    let updated = repo.mark_all_read(user.id).await?;

    assert_eq!(updated, 2);
    assert_eq!(repo.count_unread(user.id).await?, 0);
    assert_eq!(repo.count_unread(other.id).await?, 1);

    Ok(())
}
