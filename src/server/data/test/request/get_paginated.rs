use super::*;

/// Tests filtering requests by status and project together.
///
/// Expected: only the approved request of the first project
#[tokio::test]
async fn filters_by_status_and_project() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_request_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (user, project, material, _pending) =
        factory::helpers::create_request_with_dependencies(db).await?;
    let approved = factory::request::RequestFactory::new(db, user.id, project.id, material.id)
        .status(RequestStatus::Approved)
        .build()
        .await?;
    let other_project = factory::create_project(db).await?;
    factory::request::RequestFactory::new(db, user.id, other_project.id, material.id)
        .status(RequestStatus::Approved)
        .build()
        .await?;

    let filter = RequestFilter {
        status: Some(RequestStatus::Approved),
        project_id: Some(project.id),
        ..Default::default()
    };
    let (requests, total) = RequestRepository::new(db)
        .get_paginated(&filter, Pagination::default())
        .await?;

    assert_eq!(total, 1);
    assert_eq!(requests[0].id, approved.id);

    Ok(())
}

/// Tests the inclusive quantity range combined with an ascending quantity sort.
///
/// Expected: requests of 5 and 10 in that order; 1 and 50 excluded
#[tokio::test]
async fn filters_quantity_range_sorted_ascending() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_request_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (user, project, material, _) =
        factory::helpers::create_request_with_dependencies(db).await?;
    for qty in [10.0, 1.0, 50.0] {
        factory::request::RequestFactory::new(db, user.id, project.id, material.id)
            .requested_qty(qty)
            .build()
            .await?;
    }

    let filter = RequestFilter {
        min_qty: Some(5.0),
        max_qty: Some(10.0),
        sort: Sort {
            field: RequestSortField::RequestedQty,
            descending: false,
        },
        ..Default::default()
    };
    let (requests, total) = RequestRepository::new(db)
        .get_paginated(&filter, Pagination::default())
        .await?;

    let quantities: Vec<f64> = requests.iter().map(|r| r.requested_qty).collect();
    assert_eq!(total, 2);
    assert_eq!(quantities, vec![5.0, 10.0]);

    Ok(())
}

/// Tests that the default sort returns the newest request first.
///
/// Expected: the request created last is on top
#[tokio::test]
async fn defaults_to_newest_first() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_request_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (user, project, material, _) =
        factory::helpers::create_request_with_dependencies(db).await?;
    let newest = factory::request::RequestFactory::new(db, user.id, project.id, material.id)
        .build()
        .await?;

    let (requests, total) = RequestRepository::new(db)
        .get_paginated(&RequestFilter::default(), Pagination::default())
        .await?;

    assert_eq!(total, 2);
    assert_eq!(requests[0].id, newest.id);

    Ok(())
}
