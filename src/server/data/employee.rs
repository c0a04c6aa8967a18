use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, DatabaseConnection, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::model::{
    employee::{CreateEmployeeParams, Employee, UpdateEmployeeParams},
    pagination::Pagination,
};

pub struct EmployeeRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> EmployeeRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, params: CreateEmployeeParams) -> Result<Employee, DbErr> {
        let now = Utc::now();
        let entity = entity::employee::ActiveModel {
            first_name: ActiveValue::Set(params.first_name),
            last_name: ActiveValue::Set(params.last_name),
            phone: ActiveValue::Set(params.phone),
            role_id: ActiveValue::Set(params.role_id),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            deleted_at: ActiveValue::Set(None),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        let role = entity::prelude::Role::find_by_id(entity.role_id)
            .one(self.db)
            .await?;

        Ok(Employee::from_entity(entity, role))
    }

    /// Finds a live employee together with their role name.
    pub async fn find_by_id(&self, id: i32) -> Result<Option<Employee>, DbErr> {
        let result = entity::prelude::Employee::find_by_id(id)
            .filter(entity::employee::Column::DeletedAt.is_null())
            .find_also_related(entity::prelude::Role)
            .one(self.db)
            .await?;

        Ok(result.map(|(employee, role)| Employee::from_entity(employee, role)))
    }

    /// Gets a page of live employees ordered by first name.
    ///
    /// # Arguments
    /// - `search` - Optional text matched against first and last name
    pub async fn get_paginated(
        &self,
        search: Option<&str>,
        pagination: Pagination,
    ) -> Result<(Vec<Employee>, u64), DbErr> {
        let mut query = entity::prelude::Employee::find()
            .filter(entity::employee::Column::DeletedAt.is_null())
            .order_by_asc(entity::employee::Column::FirstName);

        if let Some(search) = search.filter(|s| !s.is_empty()) {
            query = query.filter(
                Condition::any()
                    .add(entity::employee::Column::FirstName.contains(search))
                    .add(entity::employee::Column::LastName.contains(search)),
            );
        }

        let total = query.clone().count(self.db).await?;
        let employees = query
            .find_also_related(entity::prelude::Role)
            .paginate(self.db, pagination.per_page)
            .fetch_page(pagination.index())
            .await?
            .into_iter()
            .map(|(employee, role)| Employee::from_entity(employee, role))
            .collect();

        Ok((employees, total))
    }

    pub async fn update(
        &self,
        id: i32,
        params: UpdateEmployeeParams,
    ) -> Result<Option<Employee>, DbErr> {
        let Some(model) = entity::prelude::Employee::find_by_id(id)
            .filter(entity::employee::Column::DeletedAt.is_null())
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active: entity::employee::ActiveModel = model.into();
        if let Some(first_name) = params.first_name {
            active.first_name = ActiveValue::Set(first_name);
        }
        if let Some(last_name) = params.last_name {
            active.last_name = ActiveValue::Set(Some(last_name));
        }
        if let Some(phone) = params.phone {
            active.phone = ActiveValue::Set(Some(phone));
        }
        if let Some(role_id) = params.role_id {
            active.role_id = ActiveValue::Set(role_id);
        }
        active.updated_at = ActiveValue::Set(Utc::now());

        let updated = active.update(self.db).await?;
        let role = entity::prelude::Role::find_by_id(updated.role_id)
            .one(self.db)
            .await?;

        Ok(Some(Employee::from_entity(updated, role)))
    }

    pub async fn soft_delete(&self, id: i32) -> Result<bool, DbErr> {
        let now = Utc::now();
        let result = entity::prelude::Employee::update_many()
            .col_expr(
                entity::employee::Column::DeletedAt,
                sea_orm::sea_query::Expr::value(now),
            )
            .filter(entity::employee::Column::Id.eq(id))
            .filter(entity::employee::Column::DeletedAt.is_null())
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
