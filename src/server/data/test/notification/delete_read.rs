use super::*;

/// Tests deleting the caller's read notifications.
///
/// Expected: read rows removed, unread rows kept
#[tokio::test]
async fn deletes_only_read_notifications() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_user_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    factory::create_notification(db, user.id).await?;
    factory::notification::NotificationFactory::new(db, user.id)
        .is_read(true)
        .build()
        .await?;

    let deleted = NotificationRepository::new(db).delete_read(user.id).await?;

    assert_eq!(deleted, 1);
    assert_eq!(entity::prelude::Notification::find().count(db).await?, 1);

    Ok(())
}

/// Tests the retention purge across users.
///
/// Expected: only read notifications created before the cutoff are removed
#[tokio::test]
async fn purges_read_notifications_before_cutoff() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_user_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let old = factory::notification::NotificationFactory::new(db, user.id)
        .is_read(true)
        .build()
        .await?;
    let mut active: entity::notification::ActiveModel = old.into();
    active.created_at = ActiveValue::Set(Utc::now() - Duration::days(45));
    active.update(db).await?;

    factory::notification::NotificationFactory::new(db, user.id)
        .is_read(true)
        .build()
        .await?;
    factory::create_notification(db, user.id).await?;

    let deleted = NotificationRepository::new(db)
        .delete_read_older_than(Utc::now() - Duration::days(30))
        .await?;

    assert_eq!(deleted, 1);
    assert_eq!(entity::prelude::Notification::find().count(db).await?, 2);

    Ok(())
}
