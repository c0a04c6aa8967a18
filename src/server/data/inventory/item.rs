//! Inventory item repository.
//!
//! Quantity writes are compare-and-swap: every update names the values it read and
//! reports the affected row count, so callers can detect a concurrent writer.

use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait,
    DbErr, EntityTrait, JoinType, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
    RelationTrait, Select,
};

use crate::server::model::{
    inventory::{CreateInventoryItemParams, InventoryItem, ItemLevels},
    pagination::Pagination,
};

/// Repository providing database operations for inventory items.
pub struct InventoryItemRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> InventoryItemRepository<'a, C> {
    /// Creates a new InventoryItemRepository instance.
    ///
    /// # Arguments
    /// - `db` - Database connection or open transaction
    ///
    /// # Returns
    /// - `InventoryItemRepository` - New repository instance
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    fn live() -> Select<entity::prelude::InventoryItem> {
        entity::prelude::InventoryItem::find()
            .filter(entity::inventory_item::Column::DeletedAt.is_null())
    }

    /// Creates an inventory item.
    ///
    /// # Arguments
    /// - `params` - Material, warehouse, type and starting quantities
    /// - `uom_id` - Unit of the item, copied from the material
    ///
    /// # Returns
    /// - `Ok(InventoryItem)` - The created item without relation summaries
    /// - `Err(DbErr)` - Database error during insert
    pub async fn create(
        &self,
        params: CreateInventoryItemParams,
        uom_id: i32,
    ) -> Result<InventoryItem, DbErr> {
        let now = Utc::now();
        let entity = entity::inventory_item::ActiveModel {
            material_id: ActiveValue::Set(params.material_id),
            warehouse_id: ActiveValue::Set(params.warehouse_id),
            uom_id: ActiveValue::Set(uom_id),
            institution_id: ActiveValue::Set(params.institution_id),
            item_type: ActiveValue::Set(params.item_type),
            quantity: ActiveValue::Set(params.quantity),
            reserved_quantity: ActiveValue::Set(params.reserved_quantity),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            deleted_at: ActiveValue::Set(None),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(InventoryItem::from_entity(entity))
    }

    /// Finds a live item without loading relations.
    pub async fn find_by_id(&self, id: i32) -> Result<Option<InventoryItem>, DbErr> {
        let entity = Self::live()
            .filter(entity::inventory_item::Column::Id.eq(id))
            .one(self.db)
            .await?;

        Ok(entity.map(InventoryItem::from_entity))
    }

    /// Finds a live item with its material, warehouse and uom summaries.
    pub async fn find_with_relations(&self, id: i32) -> Result<Option<InventoryItem>, DbErr> {
        let Some(entity) = Self::live()
            .filter(entity::inventory_item::Column::Id.eq(id))
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut items = self.attach_relations(vec![entity]).await?;

        Ok(items.pop())
    }

    /// Gets a page of live items ordered by id descending, with relation summaries.
    ///
    /// # Arguments
    /// - `search` - Optional text matched against the material name or warehouse name
    /// - `pagination` - Page to fetch
    ///
    /// # Returns
    /// - `Ok((Vec<InventoryItem>, u64))` - Items on the page and the total number of matches
    /// - `Err(DbErr)` - Database error during query
    pub async fn get_paginated(
        &self,
        search: Option<&str>,
        pagination: Pagination,
    ) -> Result<(Vec<InventoryItem>, u64), DbErr> {
        let mut query = Self::live().order_by_desc(entity::inventory_item::Column::Id);

        if let Some(search) = search.filter(|s| !s.is_empty()) {
            query = query
                .join(
                    JoinType::LeftJoin,
                    entity::inventory_item::Relation::Material.def(),
                )
                .join(
                    JoinType::LeftJoin,
                    entity::inventory_item::Relation::Warehouse.def(),
                )
                .filter(
                    Condition::any()
                        .add(entity::material::Column::Name.contains(search))
                        .add(entity::warehouse::Column::Name.contains(search)),
                );
        }

        let paginator = query.paginate(self.db, pagination.per_page);
        let total = paginator.num_items().await?;
        let entities = paginator.fetch_page(pagination.index()).await?;
        let items = self.attach_relations(entities).await?;

        Ok((items, total))
    }

    /// Sets `quantity` only if it still holds `expected`.
    ///
    /// # Returns
    /// - `Ok(u64)` - Rows affected. Zero means the item changed or disappeared since it was read
    /// - `Err(DbErr)` - Database error during update
    pub async fn set_quantity_if_unchanged(
        &self,
        id: i32,
        expected: f64,
        quantity: f64,
    ) -> Result<u64, DbErr> {
        let result = entity::prelude::InventoryItem::update_many()
            .col_expr(entity::inventory_item::Column::Quantity, Expr::value(quantity))
            .col_expr(
                entity::inventory_item::Column::UpdatedAt,
                Expr::value(Utc::now()),
            )
            .filter(entity::inventory_item::Column::Id.eq(id))
            .filter(entity::inventory_item::Column::Quantity.eq(expected))
            .filter(entity::inventory_item::Column::DeletedAt.is_null())
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Sets both quantity columns only if both still hold the `expected` pair.
    ///
    /// # Returns
    /// - `Ok(u64)` - Rows affected. Zero means a concurrent writer got there first
    /// - `Err(DbErr)` - Database error during update
    pub async fn set_levels_if_unchanged(
        &self,
        id: i32,
        expected: ItemLevels,
        levels: ItemLevels,
    ) -> Result<u64, DbErr> {
        let result = entity::prelude::InventoryItem::update_many()
            .col_expr(
                entity::inventory_item::Column::Quantity,
                Expr::value(levels.quantity),
            )
            .col_expr(
                entity::inventory_item::Column::ReservedQuantity,
                Expr::value(levels.reserved_quantity),
            )
            .col_expr(
                entity::inventory_item::Column::UpdatedAt,
                Expr::value(Utc::now()),
            )
            .filter(entity::inventory_item::Column::Id.eq(id))
            .filter(entity::inventory_item::Column::Quantity.eq(expected.quantity))
            .filter(
                entity::inventory_item::Column::ReservedQuantity.eq(expected.reserved_quantity),
            )
            .filter(entity::inventory_item::Column::DeletedAt.is_null())
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Loads the material, warehouse and uom of each item in three batched queries.
    async fn attach_relations(
        &self,
        entities: Vec<entity::inventory_item::Model>,
    ) -> Result<Vec<InventoryItem>, DbErr> {
        if entities.is_empty() {
            return Ok(Vec::new());
        }

        let material_ids: Vec<i32> = entities.iter().map(|e| e.material_id).collect();
        let warehouse_ids: Vec<i32> = entities.iter().map(|e| e.warehouse_id).collect();
        let uom_ids: Vec<i32> = entities.iter().map(|e| e.uom_id).collect();

        let materials: HashMap<i32, entity::material::Model> = entity::prelude::Material::find()
            .filter(entity::material::Column::Id.is_in(material_ids))
            .all(self.db)
            .await?
            .into_iter()
            .map(|m| (m.id, m))
            .collect();
        let warehouses: HashMap<i32, entity::warehouse::Model> =
            entity::prelude::Warehouse::find()
                .filter(entity::warehouse::Column::Id.is_in(warehouse_ids))
                .all(self.db)
                .await?
                .into_iter()
                .map(|w| (w.id, w))
                .collect();
        let uoms: HashMap<i32, entity::uom::Model> = entity::prelude::Uom::find()
            .filter(entity::uom::Column::Id.is_in(uom_ids))
            .all(self.db)
            .await?
            .into_iter()
            .map(|u| (u.id, u))
            .collect();

        Ok(entities
            .into_iter()
            .map(|e| {
                let material = materials.get(&e.material_id);
                let warehouse = warehouses.get(&e.warehouse_id);
                let uom = uoms.get(&e.uom_id);
                InventoryItem::from_entity_with_relations(e, material, warehouse, uom)
            })
            .collect())
    }
}
