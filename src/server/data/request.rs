//! Material request data repository.
//!
//! This module provides the `RequestRepository`. It is generic over the connection so that
//! delivery completion can flip the request status inside its transaction.

use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::model::{
    pagination::Pagination,
    request::{
        CreateRequestParams, Request, RequestFilter, RequestSortField, UpdateRequestParams,
    },
};
use entity::enums::RequestStatus;

/// Repository providing database operations for material requests.
pub struct RequestRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> RequestRepository<'a, C> {
    /// Creates a new RequestRepository instance.
    ///
    /// # Arguments
    /// - `db` - Database connection or open transaction
    ///
    /// # Returns
    /// - `RequestRepository` - New repository instance
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a new request in `pending` status.
    ///
    /// # Arguments
    /// - `params` - Requester, material, project and quantity
    ///
    /// # Returns
    /// - `Ok(Request)` - The created request
    /// - `Err(DbErr)` - Database error during insert
    pub async fn create(&self, params: CreateRequestParams) -> Result<Request, DbErr> {
        let now = Utc::now();
        let entity = entity::request::ActiveModel {
            requested_by: ActiveValue::Set(params.requested_by),
            material_id: ActiveValue::Set(params.material_id),
            project_id: ActiveValue::Set(params.project_id),
            requested_qty: ActiveValue::Set(params.requested_qty),
            revised_qty: ActiveValue::Set(None),
            status: ActiveValue::Set(RequestStatus::Pending),
            request_note: ActiveValue::Set(params.request_note),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Request::from_entity(entity))
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Request>, DbErr> {
        let entity = entity::prelude::Request::find_by_id(id).one(self.db).await?;

        Ok(entity.map(Request::from_entity))
    }

    /// Gets a filtered, sorted page of requests.
    ///
    /// # Arguments
    /// - `filter` - Status, project, material, creation date range, quantity range and sort
    /// - `pagination` - Page to fetch
    ///
    /// # Returns
    /// - `Ok((Vec<Request>, u64))` - Requests on the page and the total number of matches
    /// - `Err(DbErr)` - Database error during query
    pub async fn get_paginated(
        &self,
        filter: &RequestFilter,
        pagination: Pagination,
    ) -> Result<(Vec<Request>, u64), DbErr> {
        let mut query = entity::prelude::Request::find();

        if let Some(status) = filter.status {
            query = query.filter(entity::request::Column::Status.eq(status));
        }
        if let Some(project_id) = filter.project_id {
            query = query.filter(entity::request::Column::ProjectId.eq(project_id));
        }
        if let Some(material_id) = filter.material_id {
            query = query.filter(entity::request::Column::MaterialId.eq(material_id));
        }
        if let Some(start) = filter.start_date {
            query = query.filter(entity::request::Column::CreatedAt.gte(start));
        }
        if let Some(end) = filter.end_date {
            query = query.filter(entity::request::Column::CreatedAt.lte(end));
        }
        if let Some(min) = filter.min_qty {
            query = query.filter(entity::request::Column::RequestedQty.gte(min));
        }
        if let Some(max) = filter.max_qty {
            query = query.filter(entity::request::Column::RequestedQty.lte(max));
        }

        let column = match filter.sort.field {
            RequestSortField::CreatedAt => entity::request::Column::CreatedAt,
            RequestSortField::RequestedQty => entity::request::Column::RequestedQty,
            RequestSortField::Status => entity::request::Column::Status,
        };
        query = query
            .order_by(column, filter.sort.order())
            .order_by(entity::request::Column::Id, filter.sort.order());

        let paginator = query.paginate(self.db, pagination.per_page);
        let total = paginator.num_items().await?;
        let requests = paginator
            .fetch_page(pagination.index())
            .await?
            .into_iter()
            .map(Request::from_entity)
            .collect();

        Ok((requests, total))
    }

    /// Applies an edit only while the request is still `pending`.
    ///
    /// # Returns
    /// - `Ok(1)` - Request edited
    /// - `Ok(0)` - No such request, or it left `pending` since it was read
    pub async fn update_if_pending(
        &self,
        id: i32,
        params: UpdateRequestParams,
    ) -> Result<u64, DbErr> {
        let mut update = entity::prelude::Request::update_many()
            .col_expr(entity::request::Column::UpdatedAt, Expr::value(Utc::now()));
        if let Some(revised_qty) = params.revised_qty {
            update = update.col_expr(
                entity::request::Column::RevisedQty,
                Expr::value(Some(revised_qty)),
            );
        }
        if let Some(note) = params.request_note {
            update = update.col_expr(entity::request::Column::RequestNote, Expr::value(Some(note)));
        }

        let result = update
            .filter(entity::request::Column::Id.eq(id))
            .filter(entity::request::Column::Status.eq(RequestStatus::Pending))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Moves a request from `from` to `to`, only if it still has status `from`.
    ///
    /// Two concurrent transitions out of the same status cannot both succeed.
    ///
    /// # Returns
    /// - `Ok(1)` - Status changed
    /// - `Ok(0)` - No such request, or its status is no longer `from`
    pub async fn transition_status(
        &self,
        id: i32,
        from: RequestStatus,
        to: RequestStatus,
    ) -> Result<u64, DbErr> {
        let result = entity::prelude::Request::update_many()
            .col_expr(entity::request::Column::Status, Expr::value(to))
            .col_expr(entity::request::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(entity::request::Column::Id.eq(id))
            .filter(entity::request::Column::Status.eq(from))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Counts the `pending` and `approved` requests for a material.
    pub async fn count_open_for_material(&self, material_id: i32) -> Result<u64, DbErr> {
        entity::prelude::Request::find()
            .filter(entity::request::Column::MaterialId.eq(material_id))
            .filter(
                entity::request::Column::Status
                    .is_in([RequestStatus::Pending, RequestStatus::Approved]),
            )
            .count(self.db)
            .await
    }

    /// Counts every request that references a material, whatever its status.
    pub async fn count_for_material(&self, material_id: i32) -> Result<u64, DbErr> {
        entity::prelude::Request::find()
            .filter(entity::request::Column::MaterialId.eq(material_id))
            .count(self.db)
            .await
    }
}
