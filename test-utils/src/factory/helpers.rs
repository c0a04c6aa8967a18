//! Shared helper utilities for factory methods.

use sea_orm::{DatabaseConnection, DbErr};

/// Counter for generating unique values in tests.
static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

/// Gets the next unique counter value for test data.
///
/// Used for usernames, material codes and other unique columns.
pub fn next_id() -> u64 {
    COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}

/// Creates an inventory item together with the rows it references.
///
/// Creates in order:
/// 1. Uom
/// 2. Material using that unit
/// 3. Warehouse
/// 4. InventoryItem with quantity `10.0`
///
/// # Returns
/// - `Ok(item)` - The created inventory item
/// - `Err(DbErr)` - Database error during creation
pub async fn create_inventory_item_with_dependencies(
    db: &DatabaseConnection,
) -> Result<entity::inventory_item::Model, DbErr> {
    let uom = crate::factory::uom::create_uom(db).await?;
    let material = crate::factory::material::MaterialFactory::new(db, uom.id)
        .build()
        .await?;
    let warehouse = crate::factory::warehouse::create_warehouse(db).await?;

    crate::factory::inventory_item::InventoryItemFactory::new(
        db,
        material.id,
        warehouse.id,
        uom.id,
    )
    .build()
    .await
}

/// Creates a pending request together with its requester, project, unit and material.
///
/// The material is created with a stock of `100.0`.
///
/// # Returns
/// - `Ok((user, project, material, request))` - Tuple of all created entities
/// - `Err(DbErr)` - Database error during creation
pub async fn create_request_with_dependencies(
    db: &DatabaseConnection,
) -> Result<
    (
        entity::user::Model,
        entity::project::Model,
        entity::material::Model,
        entity::request::Model,
    ),
    DbErr,
> {
    let user = crate::factory::user::create_user(db).await?;
    let project = crate::factory::project::create_project(db).await?;
    let uom = crate::factory::uom::create_uom(db).await?;
    let material = crate::factory::material::MaterialFactory::new(db, uom.id)
        .stock_qty(100.0)
        .build()
        .await?;
    let request =
        crate::factory::request::RequestFactory::new(db, user.id, project.id, material.id)
            .build()
            .await?;

    Ok((user, project, material, request))
}
