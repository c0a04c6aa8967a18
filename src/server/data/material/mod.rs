//! Material data repository for database operations.
//!
//! This module provides the `MaterialRepository` for the material catalogue and the
//! `MaterialAttributeRepository` in `attribute`. The repository is generic over the
//! connection so stock changes can run inside the delivery completion transaction.

pub mod attribute;

use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait,
    DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Select,
};

use crate::server::model::{
    material::{
        CreateMaterialParams, Material, MaterialFilter, MaterialSortField, UpdateMaterialParams,
    },
    pagination::Pagination,
};

pub use attribute::MaterialAttributeRepository;

/// Repository providing database operations for materials.
///
/// Materials are soft deleted. Every read excludes rows with `deleted_at` set.
pub struct MaterialRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> MaterialRepository<'a, C> {
    /// Creates a new MaterialRepository instance.
    ///
    /// # Arguments
    /// - `db` - Database connection or open transaction
    ///
    /// # Returns
    /// - `MaterialRepository` - New repository instance
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    fn live() -> Select<entity::prelude::Material> {
        entity::prelude::Material::find().filter(entity::material::Column::DeletedAt.is_null())
    }

    /// Creates a new material.
    ///
    /// # Arguments
    /// - `params` - Trimmed code, name and initial stock levels
    ///
    /// # Returns
    /// - `Ok(Material)` - The created material
    /// - `Err(DbErr)` - Database error, including a unique violation on `code`
    pub async fn create(&self, params: CreateMaterialParams) -> Result<Material, DbErr> {
        let now = Utc::now();
        let entity = entity::material::ActiveModel {
            code: ActiveValue::Set(params.code),
            name: ActiveValue::Set(params.name),
            description: ActiveValue::Set(params.description),
            uom_id: ActiveValue::Set(params.uom_id),
            stock_qty: ActiveValue::Set(params.stock_qty),
            min_stock_qty: ActiveValue::Set(params.min_stock_qty),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            deleted_at: ActiveValue::Set(None),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Material::from_entity(entity))
    }

    /// Finds a live material by id.
    pub async fn find_by_id(&self, id: i32) -> Result<Option<Material>, DbErr> {
        let entity = Self::live()
            .filter(entity::material::Column::Id.eq(id))
            .one(self.db)
            .await?;

        Ok(entity.map(Material::from_entity))
    }

    /// Checks whether any material row, deleted ones included, already uses `code`.
    pub async fn code_taken(&self, code: &str, exclude_id: Option<i32>) -> Result<bool, DbErr> {
        let mut query =
            entity::prelude::Material::find().filter(entity::material::Column::Code.eq(code));
        if let Some(id) = exclude_id {
            query = query.filter(entity::material::Column::Id.ne(id));
        }

        Ok(query.count(self.db).await? > 0)
    }

    /// Gets a filtered, sorted page of live materials.
    ///
    /// # Arguments
    /// - `filter` - Search text, UoM, stock range, low-stock flag and sort order
    /// - `pagination` - Page to fetch
    ///
    /// # Returns
    /// - `Ok((Vec<Material>, u64))` - Materials on the page and the total number of matches
    /// - `Err(DbErr)` - Database error during query
    pub async fn get_paginated(
        &self,
        filter: &MaterialFilter,
        pagination: Pagination,
    ) -> Result<(Vec<Material>, u64), DbErr> {
        let mut query = Self::live();

        if let Some(search) = filter.search.as_deref().filter(|s| !s.is_empty()) {
            query = query.filter(
                Condition::any()
                    .add(entity::material::Column::Code.contains(search))
                    .add(entity::material::Column::Name.contains(search)),
            );
        }
        if let Some(uom_id) = filter.uom_id {
            query = query.filter(entity::material::Column::UomId.eq(uom_id));
        }
        if let Some(min) = filter.min_stock {
            query = query.filter(entity::material::Column::StockQty.gte(min));
        }
        if let Some(max) = filter.max_stock {
            query = query.filter(entity::material::Column::StockQty.lte(max));
        }
        if filter.low_stock {
            query = query.filter(low_stock_condition());
        }

        let column = match filter.sort.field {
            MaterialSortField::Code => entity::material::Column::Code,
            MaterialSortField::Name => entity::material::Column::Name,
            MaterialSortField::StockQty => entity::material::Column::StockQty,
            MaterialSortField::CreatedAt => entity::material::Column::CreatedAt,
        };
        query = query
            .order_by(column, filter.sort.order())
            .order_by(entity::material::Column::Id, filter.sort.order());

        let paginator = query.paginate(self.db, pagination.per_page);
        let total = paginator.num_items().await?;
        let materials = paginator
            .fetch_page(pagination.index())
            .await?
            .into_iter()
            .map(Material::from_entity)
            .collect();

        Ok((materials, total))
    }

    /// Applies a partial update to a live material.
    ///
    /// # Returns
    /// - `Ok(Some(Material))` - Updated material
    /// - `Ok(None)` - Material missing or soft deleted
    pub async fn update(
        &self,
        id: i32,
        params: UpdateMaterialParams,
    ) -> Result<Option<Material>, DbErr> {
        let Some(model) = Self::live()
            .filter(entity::material::Column::Id.eq(id))
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active: entity::material::ActiveModel = model.into();
        if let Some(code) = params.code {
            active.code = ActiveValue::Set(code);
        }
        if let Some(name) = params.name {
            active.name = ActiveValue::Set(name);
        }
        if let Some(description) = params.description {
            active.description = ActiveValue::Set(Some(description));
        }
        if let Some(uom_id) = params.uom_id {
            active.uom_id = ActiveValue::Set(uom_id);
        }
        if let Some(min_stock_qty) = params.min_stock_qty {
            active.min_stock_qty = ActiveValue::Set(min_stock_qty);
        }
        active.updated_at = ActiveValue::Set(Utc::now());

        Ok(Some(Material::from_entity(active.update(self.db).await?)))
    }

    /// Sets `stock_qty` only if it still holds `expected`.
    ///
    /// # Arguments
    /// - `id` - Material to update
    /// - `expected` - Stock value read earlier in the same unit of work
    /// - `new_stock` - Value to store
    ///
    /// # Returns
    /// - `Ok(u64)` - Rows affected. Zero means another writer changed the stock first
    /// - `Err(DbErr)` - Database error during update
    pub async fn set_stock_if_unchanged(
        &self,
        id: i32,
        expected: f64,
        new_stock: f64,
    ) -> Result<u64, DbErr> {
        let result = entity::prelude::Material::update_many()
            .col_expr(entity::material::Column::StockQty, Expr::value(new_stock))
            .col_expr(entity::material::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(entity::material::Column::Id.eq(id))
            .filter(entity::material::Column::StockQty.eq(expected))
            .filter(entity::material::Column::DeletedAt.is_null())
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    pub async fn soft_delete(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::Material::update_many()
            .col_expr(entity::material::Column::DeletedAt, Expr::value(Utc::now()))
            .filter(entity::material::Column::Id.eq(id))
            .filter(entity::material::Column::DeletedAt.is_null())
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Gets every live material whose stock is at or below its minimum.
    pub async fn get_low_stock(&self) -> Result<Vec<Material>, DbErr> {
        let entities = Self::live()
            .filter(low_stock_condition())
            .order_by_asc(entity::material::Column::Code)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Material::from_entity).collect())
    }

    /// Gets every live material ordered by code.
    pub async fn get_all(&self) -> Result<Vec<Material>, DbErr> {
        let entities = Self::live()
            .order_by_asc(entity::material::Column::Code)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Material::from_entity).collect())
    }

    pub async fn count(&self) -> Result<u64, DbErr> {
        Self::live().count(self.db).await
    }

    pub async fn count_low_stock(&self) -> Result<u64, DbErr> {
        Self::live().filter(low_stock_condition()).count(self.db).await
    }
}

fn low_stock_condition() -> sea_orm::sea_query::SimpleExpr {
    Expr::col((entity::material::Entity, entity::material::Column::StockQty)).lte(Expr::col((
        entity::material::Entity,
        entity::material::Column::MinStockQty,
    )))
}
