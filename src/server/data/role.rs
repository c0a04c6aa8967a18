use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::model::{
    pagination::Pagination,
    role::{CreateRoleParams, Role, UpdateRoleParams},
};
use entity::enums::RoleKind;

pub struct RoleRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> RoleRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, params: CreateRoleParams) -> Result<Role, DbErr> {
        let now = Utc::now();
        let entity = entity::role::ActiveModel {
            name: ActiveValue::Set(params.name),
            kind: ActiveValue::Set(params.kind),
            is_system: ActiveValue::Set(params.is_system),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            deleted_at: ActiveValue::Set(None),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Role::from_entity(entity))
    }

    /// Finds a role that has not been deleted.
    pub async fn find_by_id(&self, id: i32) -> Result<Option<Role>, DbErr> {
        let entity = entity::prelude::Role::find_by_id(id)
            .filter(entity::role::Column::DeletedAt.is_null())
            .one(self.db)
            .await?;

        Ok(entity.map(Role::from_entity))
    }

    /// Finds a live role by exact name and kind.
    pub async fn find_by_name(&self, name: &str, kind: RoleKind) -> Result<Option<Role>, DbErr> {
        let entity = entity::prelude::Role::find()
            .filter(entity::role::Column::Name.eq(name))
            .filter(entity::role::Column::Kind.eq(kind))
            .filter(entity::role::Column::DeletedAt.is_null())
            .one(self.db)
            .await?;

        Ok(entity.map(Role::from_entity))
    }

    /// Gets a page of live roles ordered by name, optionally limited to one kind.
    pub async fn get_paginated(
        &self,
        kind: Option<RoleKind>,
        pagination: Pagination,
    ) -> Result<(Vec<Role>, u64), DbErr> {
        let mut query = entity::prelude::Role::find()
            .filter(entity::role::Column::DeletedAt.is_null())
            .order_by_asc(entity::role::Column::Name);

        if let Some(kind) = kind {
            query = query.filter(entity::role::Column::Kind.eq(kind));
        }

        let paginator = query.paginate(self.db, pagination.per_page);
        let total = paginator.num_items().await?;
        let roles = paginator
            .fetch_page(pagination.index())
            .await?
            .into_iter()
            .map(Role::from_entity)
            .collect();

        Ok((roles, total))
    }

    pub async fn update(&self, id: i32, params: UpdateRoleParams) -> Result<Option<Role>, DbErr> {
        let Some(model) = entity::prelude::Role::find_by_id(id)
            .filter(entity::role::Column::DeletedAt.is_null())
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active: entity::role::ActiveModel = model.into();
        if let Some(name) = params.name {
            active.name = ActiveValue::Set(name);
        }
        if let Some(kind) = params.kind {
            active.kind = ActiveValue::Set(kind);
        }
        active.updated_at = ActiveValue::Set(Utc::now());

        Ok(Some(Role::from_entity(active.update(self.db).await?)))
    }

    /// Marks a role as deleted. Returns false if it was missing or already deleted.
    pub async fn soft_delete(&self, id: i32) -> Result<bool, DbErr> {
        let now = Utc::now();
        let result = entity::prelude::Role::update_many()
            .col_expr(
                entity::role::Column::DeletedAt,
                sea_orm::sea_query::Expr::value(now),
            )
            .filter(entity::role::Column::Id.eq(id))
            .filter(entity::role::Column::DeletedAt.is_null())
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Counts live employees holding the role.
    pub async fn employee_count(&self, id: i32) -> Result<u64, DbErr> {
        entity::prelude::Employee::find()
            .filter(entity::employee::Column::RoleId.eq(id))
            .filter(entity::employee::Column::DeletedAt.is_null())
            .count(self.db)
            .await
    }
}
