use super::*;
use crate::{
    model::statistics::StockLevel,
    server::{
        model::statistics::DateRange,
        service::{
            delivery::DeliveryService,
            material::MaterialService,
            statistics::{most_used_limit, StatisticsService},
        },
    },
};
use entity::enums::{MovementKind, RequestStatus};

/// Materials, requests and movements shared by the report tests.
struct Fixture {
    project_id: i32,
    steel_id: i32,
    cement_id: i32,
}

/// Seeds four materials (one ok, one ok after restocking, one empty, one low), three
/// requests on one project, one completed delivery and two stock adjustments.
///
/// Resulting movements: steel out 6 (delivery), cement out 20 and in 30 (adjustments).
async fn seed(db: &DatabaseConnection) -> Result<Fixture, AppError> {
    let user = factory::create_user(db).await?;
    let project = factory::create_project(db).await?;
    let uom = factory::create_uom(db).await?;

    let material = |code: &'static str, stock: f64, min: f64| {
        factory::material::MaterialFactory::new(db, uom.id)
            .code(code)
            .stock_qty(stock)
            .min_stock_qty(min)
            .build()
    };
    let steel = material("STL-001", 100.0, 10.0).await?;
    let cement = material("CEM-001", 50.0, 10.0).await?;
    material("SND-001", 0.0, 5.0).await?;
    material("GRV-001", 3.0, 5.0).await?;

    let request = |material_id, qty, status| {
        factory::request::RequestFactory::new(db, user.id, project.id, material_id)
            .requested_qty(qty)
            .status(status)
    };
    request(steel.id, 4.0, RequestStatus::Pending).build().await?;
    let approved = request(steel.id, 5.0, RequestStatus::Approved)
        .revised_qty(Some(6.0))
        .build()
        .await?;
    request(cement.id, 2.0, RequestStatus::Rejected).build().await?;

    DeliveryService::new(db)
        .complete(user.id, approved.id, None)
        .await?;

    let materials = MaterialService::new(db);
    materials.update_stock(user.id, cement.id, 30.0, None).await?;
    materials.update_stock(user.id, cement.id, 60.0, None).await?;

    Ok(Fixture {
        project_id: project.id,
        steel_id: steel.id,
        cement_id: cement.id,
    })
}

/// Tests the overall dashboard counts.
///
/// Expected: 4 materials, 1 project, one request per status, 1 completed delivery and
/// 2 materials at or below their minimum
#[tokio::test]
async fn overall_counts() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    seed(db).await?;

    let overall = StatisticsService::new(db).overall().await?;

    assert_eq!(overall.materials, 4);
    assert_eq!(overall.projects, 1);
    assert_eq!(overall.warehouses, 0);
    assert_eq!(overall.users, 1);
    assert_eq!(overall.completed_deliveries, 1);
    assert_eq!(overall.low_stock_materials, 2);

    let mut statuses: Vec<_> = overall
        .requests_by_status
        .iter()
        .map(|s| (s.status, s.count))
        .collect();
    statuses.sort_by_key(|(status, _)| format!("{:?}", status));
    assert_eq!(
        statuses,
        vec![
            (RequestStatus::Delivered, 1),
            (RequestStatus::Pending, 1),
            (RequestStatus::Rejected, 1),
        ]
    );

    Ok(())
}

/// Tests movement totals per kind within the default range.
///
/// Expected: out 2 movements totalling 26, in 1 movement of 30
#[tokio::test]
async fn stock_movement_totals() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    seed(db).await?;

    let summary = StatisticsService::new(db)
        .stock_movements(DateRange::resolve(None, None))
        .await?;

    let out = summary.iter().find(|s| s.kind == MovementKind::Out).unwrap();
    assert_eq!(out.count, 2);
    assert_eq!(out.total_quantity, 26.0);

    let incoming = summary.iter().find(|s| s.kind == MovementKind::In).unwrap();
    assert_eq!(incoming.count, 1);
    assert_eq!(incoming.total_quantity, 30.0);

    Ok(())
}

/// Tests that the status distribution honours its date range.
///
/// Expected: 3 requests in the default range, none in a range that ended yesterday
#[tokio::test]
async fn request_distribution_uses_range() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    seed(db).await?;

    let service = StatisticsService::new(db);

    let current = service
        .request_distribution(DateRange::resolve(None, None))
        .await?;
    assert_eq!(current.iter().map(|s| s.count).sum::<u64>(), 3);

    let yesterday = chrono::Utc::now() - chrono::Duration::days(1);
    let past = service
        .request_distribution(DateRange::resolve(None, Some(yesterday)))
        .await?;
    assert!(past.is_empty());

    Ok(())
}

/// Tests the ranking of materials by outgoing quantity and its limit.
///
/// Expected: cement (20) before steel (6); limit 1 and limit 0 both return only cement
#[tokio::test]
async fn ranks_most_used_materials() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let fixture = seed(db).await?;

    let service = StatisticsService::new(db);

    let ranked = service.most_used_materials(None).await?;
    assert_eq!(ranked.len(), 2);
    assert_eq!(ranked[0].material_id, fixture.cement_id);
    assert_eq!(ranked[0].total_quantity, 20.0);
    assert_eq!(ranked[1].material_id, fixture.steel_id);
    assert_eq!(ranked[1].total_quantity, 6.0);

    for limit in [Some(1), Some(0)] {
        let top = service.most_used_materials(limit).await?;
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].material_id, fixture.cement_id);
    }

    Ok(())
}

/// Tests resolution of the `limit` query value.
///
/// Expected: default 10, floor 1, cap 100
#[test]
fn most_used_limit_is_clamped() {
    assert_eq!(most_used_limit(None), 10);
    assert_eq!(most_used_limit(Some(0)), 1);
    assert_eq!(most_used_limit(Some(25)), 25);
    assert_eq!(most_used_limit(Some(500)), 100);
}

/// Tests per-material usage for one project.
///
/// Expected: steel requested 9 and delivered 6 (the revised quantity), cement requested
/// 2 and delivered 0; an unknown project is NotFound
#[tokio::test]
async fn project_material_usage_totals() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let fixture = seed(db).await?;

    let service = StatisticsService::new(db);
    let usage = service.project_material_usage(fixture.project_id).await?;

    let steel = usage
        .iter()
        .find(|u| u.material_id == fixture.steel_id)
        .unwrap();
    assert_eq!(steel.requested_quantity, 9.0);
    assert_eq!(steel.delivered_quantity, 6.0);
    assert_eq!(steel.request_count, 2);

    let cement = usage
        .iter()
        .find(|u| u.material_id == fixture.cement_id)
        .unwrap();
    assert_eq!(cement.requested_quantity, 2.0);
    assert_eq!(cement.delivered_quantity, 0.0);

    let missing = service.project_material_usage(999).await;
    assert!(matches!(missing, Err(AppError::NotFound(_))));

    Ok(())
}

/// Tests delivery performance over the default range.
///
/// Expected: one completed delivery, a 100% completion rate and a measured average
#[tokio::test]
async fn delivery_performance_summary() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    seed(db).await?;

    let performance = StatisticsService::new(db)
        .delivery_performance(DateRange::resolve(None, None))
        .await?;

    assert_eq!(performance.total, 1);
    assert_eq!(performance.completed, 1);
    assert_eq!(performance.pending, 0);
    assert_eq!(performance.completion_rate(), 100.0);
    assert!(performance.average_delivery_hours.is_some_and(|h| h >= 0.0));

    Ok(())
}

/// Tests stock level buckets.
///
/// Expected: one empty, one low and two ok materials; attention list emptiest first
#[tokio::test]
async fn stock_level_buckets() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    seed(db).await?;

    let analysis = StatisticsService::new(db).stock_level_analysis().await?;

    assert_eq!(analysis.out_of_stock, 1);
    assert_eq!(analysis.low, 1);
    assert_eq!(analysis.ok, 2);

    let codes: Vec<_> = analysis.attention.iter().map(|a| a.code.as_str()).collect();
    assert_eq!(codes, vec!["SND-001", "GRV-001"]);
    assert_eq!(analysis.attention[0].level, StockLevel::OutOfStock);
    assert_eq!(analysis.attention[1].level, StockLevel::Low);

    Ok(())
}
