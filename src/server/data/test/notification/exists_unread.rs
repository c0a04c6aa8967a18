use super::*;

/// Tests the duplicate check used by the low-stock sweep.
///
/// Expected: true only for an unread notification about the same reference
#[tokio::test]
async fn matches_unread_notification_for_reference() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_user_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    factory::notification::NotificationFactory::new(db, user.id)
        .category(NotificationCategory::StockLevel)
        .reference("material", 7)
        .build()
        .await?;
    factory::notification::NotificationFactory::new(db, user.id)
        .category(NotificationCategory::StockLevel)
        .reference("material", 8)
        .is_read(true)
        .build()
        .await?;

    let repo = NotificationRepository::new(db);

    assert!(
        repo.exists_unread(user.id, NotificationCategory::StockLevel, "material", 7)
            .await?
    );
    assert!(
        !repo
            .exists_unread(user.id, NotificationCategory::StockLevel, "material", 8)
            .await?
    );
    assert!(
        !repo
            .exists_unread(user.id, NotificationCategory::RequestStatus, "material", 7)
            .await?
    );

    Ok(())
}
