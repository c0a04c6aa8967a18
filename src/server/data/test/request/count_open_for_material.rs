use super::*;

/// Tests counting requests that still block a material from deletion.
///
/// Expected: pending and approved counted as open; every request counted overall
#[tokio::test]
async fn counts_open_requests() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_request_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (user, project, material, _pending) =
        factory::helpers::create_request_with_dependencies(db).await?;
    for status in [
        RequestStatus::Approved,
        RequestStatus::Rejected,
        RequestStatus::Delivered,
    ] {
        factory::request::RequestFactory::new(db, user.id, project.id, material.id)
            .status(status)
            .build()
            .await?;
    }

    let repo = RequestRepository::new(db);
    assert_eq!(repo.count_open_for_material(material.id).await?, 2);
    assert_eq!(repo.count_for_material(material.id).await?, 4);

    Ok(())
}
