//! Project data repository for database operations.
//!
//! This module provides the `ProjectRepository` for project records, plus the membership
//! repositories in `user` and `employee`. Projects are soft deleted, so every read filters
//! on `deleted_at IS NULL`.

pub mod employee;
pub mod user;

use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

use crate::server::model::{
    pagination::Pagination,
    project::{CreateProjectParams, Project, UpdateProjectParams},
};
use entity::enums::UserRole;

pub use employee::ProjectEmployeeRepository;
pub use user::ProjectUserRepository;

/// Repository providing database operations for project management.
pub struct ProjectRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ProjectRepository<'a> {
    /// Creates a new ProjectRepository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    ///
    /// # Returns
    /// - `ProjectRepository` - New repository instance
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a new project. Membership counts of a new project are always zero.
    pub async fn create(&self, params: CreateProjectParams) -> Result<Project, DbErr> {
        let now = Utc::now();
        let entity = entity::project::ActiveModel {
            name: ActiveValue::Set(params.name),
            description: ActiveValue::Set(params.description),
            status: ActiveValue::Set(params.status),
            start_date: ActiveValue::Set(params.start_date),
            end_date: ActiveValue::Set(params.end_date),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            deleted_at: ActiveValue::Set(None),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Project::from_entity(entity, 0, 0))
    }

    /// Finds a live project with its engineer and contractor counts.
    ///
    /// # Returns
    /// - `Ok(Some(Project))` - Project found
    /// - `Ok(None)` - Project missing or soft deleted
    /// - `Err(DbErr)` - Database error during query
    pub async fn find_by_id(&self, id: i32) -> Result<Option<Project>, DbErr> {
        let Some(entity) = entity::prelude::Project::find_by_id(id)
            .filter(entity::project::Column::DeletedAt.is_null())
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let counts = self.member_counts(&[entity.id]).await?;
        let (engineers, contractors) = counts.get(&entity.id).copied().unwrap_or_default();

        Ok(Some(Project::from_entity(entity, engineers, contractors)))
    }

    /// Checks whether a live project exists.
    pub async fn exists(&self, id: i32) -> Result<bool, DbErr> {
        let count = entity::prelude::Project::find_by_id(id)
            .filter(entity::project::Column::DeletedAt.is_null())
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Gets a page of live projects, newest first, with membership counts.
    ///
    /// # Arguments
    /// - `pagination` - Page to fetch
    ///
    /// # Returns
    /// - `Ok((Vec<Project>, u64))` - Projects on the page and the total number of projects
    /// - `Err(DbErr)` - Database error during query
    pub async fn get_paginated(
        &self,
        pagination: Pagination,
    ) -> Result<(Vec<Project>, u64), DbErr> {
        let paginator = entity::prelude::Project::find()
            .filter(entity::project::Column::DeletedAt.is_null())
            .order_by_desc(entity::project::Column::CreatedAt)
            .order_by_desc(entity::project::Column::Id)
            .paginate(self.db, pagination.per_page);

        let total = paginator.num_items().await?;
        let entities = paginator.fetch_page(pagination.index()).await?;

        let ids: Vec<i32> = entities.iter().map(|p| p.id).collect();
        let counts = self.member_counts(&ids).await?;

        let projects = entities
            .into_iter()
            .map(|p| {
                let (engineers, contractors) = counts.get(&p.id).copied().unwrap_or_default();
                Project::from_entity(p, engineers, contractors)
            })
            .collect();

        Ok((projects, total))
    }

    pub async fn update(
        &self,
        id: i32,
        params: UpdateProjectParams,
    ) -> Result<Option<Project>, DbErr> {
        let Some(model) = entity::prelude::Project::find_by_id(id)
            .filter(entity::project::Column::DeletedAt.is_null())
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active: entity::project::ActiveModel = model.into();
        if let Some(name) = params.name {
            active.name = ActiveValue::Set(name);
        }
        if let Some(description) = params.description {
            active.description = ActiveValue::Set(Some(description));
        }
        if let Some(status) = params.status {
            active.status = ActiveValue::Set(status);
        }
        if let Some(start_date) = params.start_date {
            active.start_date = ActiveValue::Set(Some(start_date));
        }
        if let Some(end_date) = params.end_date {
            active.end_date = ActiveValue::Set(Some(end_date));
        }
        active.updated_at = ActiveValue::Set(Utc::now());

        let entity = active.update(self.db).await?;
        let counts = self.member_counts(&[entity.id]).await?;
        let (engineers, contractors) = counts.get(&entity.id).copied().unwrap_or_default();

        Ok(Some(Project::from_entity(entity, engineers, contractors)))
    }

    pub async fn soft_delete(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::Project::update_many()
            .col_expr(entity::project::Column::DeletedAt, Expr::value(Utc::now()))
            .filter(entity::project::Column::Id.eq(id))
            .filter(entity::project::Column::DeletedAt.is_null())
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    pub async fn count(&self) -> Result<u64, DbErr> {
        entity::prelude::Project::find()
            .filter(entity::project::Column::DeletedAt.is_null())
            .count(self.db)
            .await
    }

    /// Counts engineer and contractor memberships for each of the given projects.
    ///
    /// # Returns
    /// - `Ok(HashMap)` - `project_id -> (engineers, contractors)`. Projects without
    ///   members are absent from the map
    async fn member_counts(&self, project_ids: &[i32]) -> Result<HashMap<i32, (u64, u64)>, DbErr> {
        if project_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows: Vec<(i32, UserRole, i64)> = entity::prelude::ProjectUser::find()
            .select_only()
            .column(entity::project_user::Column::ProjectId)
            .column(entity::project_user::Column::Role)
            .column_as(Expr::col(entity::project_user::Column::Id).count(), "count")
            .filter(entity::project_user::Column::ProjectId.is_in(project_ids.iter().copied()))
            .filter(
                entity::project_user::Column::Role
                    .is_in([UserRole::Engineer, UserRole::Contractor]),
            )
            .group_by(entity::project_user::Column::ProjectId)
            .group_by(entity::project_user::Column::Role)
            .into_tuple()
            .all(self.db)
            .await?;

        let mut counts: HashMap<i32, (u64, u64)> = HashMap::new();
        for (project_id, role, count) in rows {
            let entry = counts.entry(project_id).or_default();
            match role {
                UserRole::Engineer => entry.0 = count as u64,
                UserRole::Contractor => entry.1 = count as u64,
                _ => {}
            }
        }

        Ok(counts)
    }
}
