//! User data repository for database operations.
//!
//! This module provides the `UserRepository` for managing user accounts. Password hashes
//! never leave this module except through the dedicated credential lookups used by the
//! authentication service.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, DatabaseConnection, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

use crate::server::model::{
    pagination::Pagination,
    user::{CreateUserParams, UpdateUserParams, User},
};
use entity::enums::UserRole;

/// Repository providing database operations for user management.
pub struct UserRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserRepository<'a> {
    /// Creates a new UserRepository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    ///
    /// # Returns
    /// - `UserRepository` - New repository instance
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts a new user with an already hashed password.
    ///
    /// # Returns
    /// - `Ok(User)` - The created user
    /// - `Err(DbErr)` - Database error, including unique violations on username or email
    pub async fn create(&self, params: CreateUserParams) -> Result<User, DbErr> {
        let now = Utc::now();
        let entity = entity::user::ActiveModel {
            username: ActiveValue::Set(params.username),
            email: ActiveValue::Set(params.email),
            password_hash: ActiveValue::Set(params.password_hash),
            full_name: ActiveValue::Set(params.full_name),
            role: ActiveValue::Set(params.role),
            phone: ActiveValue::Set(params.phone),
            is_active: ActiveValue::Set(params.is_active),
            last_login: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(User::from_entity(entity))
    }

    /// Finds a user by id.
    ///
    /// # Returns
    /// - `Ok(Some(User))` - User found
    /// - `Ok(None)` - No user with that id
    /// - `Err(DbErr)` - Database error during query
    pub async fn find_by_id(&self, id: i32) -> Result<Option<User>, DbErr> {
        let entity = entity::prelude::User::find_by_id(id).one(self.db).await?;

        Ok(entity.map(User::from_entity))
    }

    /// Finds a user by username together with the stored password hash.
    pub async fn find_credentials_by_username(
        &self,
        username: &str,
    ) -> Result<Option<(User, String)>, DbErr> {
        let entity = entity::prelude::User::find()
            .filter(entity::user::Column::Username.eq(username))
            .one(self.db)
            .await?;

        Ok(entity.map(|e| {
            let hash = e.password_hash.clone();
            (User::from_entity(e), hash)
        }))
    }

    /// Gets the stored password hash of a user.
    pub async fn find_password_hash(&self, id: i32) -> Result<Option<String>, DbErr> {
        let entity = entity::prelude::User::find_by_id(id).one(self.db).await?;

        Ok(entity.map(|e| e.password_hash))
    }

    /// Checks whether another account already uses the username or email.
    ///
    /// # Arguments
    /// - `username` / `email` - Values to check, `None` skips the check for that column
    /// - `exclude_id` - User to ignore, used when updating that user
    pub async fn identity_taken(
        &self,
        username: Option<&str>,
        email: Option<&str>,
        exclude_id: Option<i32>,
    ) -> Result<bool, DbErr> {
        let mut any = Condition::any();
        if let Some(username) = username {
            any = any.add(entity::user::Column::Username.eq(username));
        }
        if let Some(email) = email {
            any = any.add(entity::user::Column::Email.eq(email));
        }
        if any.is_empty() {
            return Ok(false);
        }

        let mut query = entity::prelude::User::find().filter(any);
        if let Some(id) = exclude_id {
            query = query.filter(entity::user::Column::Id.ne(id));
        }

        Ok(query.count(self.db).await? > 0)
    }

    /// Gets a page of users ordered by username.
    ///
    /// # Arguments
    /// - `search` - Optional text matched against username, email and full name
    /// - `pagination` - Page to fetch
    ///
    /// # Returns
    /// - `Ok((Vec<User>, u64))` - Users on the page and the total number of matches
    /// - `Err(DbErr)` - Database error during query
    pub async fn get_paginated(
        &self,
        search: Option<&str>,
        pagination: Pagination,
    ) -> Result<(Vec<User>, u64), DbErr> {
        let mut query = entity::prelude::User::find().order_by_asc(entity::user::Column::Username);

        if let Some(search) = search.filter(|s| !s.is_empty()) {
            query = query.filter(
                Condition::any()
                    .add(entity::user::Column::Username.contains(search))
                    .add(entity::user::Column::Email.contains(search))
                    .add(entity::user::Column::FullName.contains(search)),
            );
        }

        let paginator = query.paginate(self.db, pagination.per_page);
        let total = paginator.num_items().await?;
        let users = paginator
            .fetch_page(pagination.index())
            .await?
            .into_iter()
            .map(User::from_entity)
            .collect();

        Ok((users, total))
    }

    /// Applies a partial update.
    ///
    /// # Arguments
    /// - `id` - User to update
    /// - `params` - Fields to change. `params.password` is ignored
    /// - `password_hash` - New hash to store, if the password changes
    ///
    /// # Returns
    /// - `Ok(Some(User))` - Updated user
    /// - `Ok(None)` - No user with that id
    pub async fn update(
        &self,
        id: i32,
        params: UpdateUserParams,
        password_hash: Option<String>,
    ) -> Result<Option<User>, DbErr> {
        let Some(model) = entity::prelude::User::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let mut active: entity::user::ActiveModel = model.into();
        if let Some(username) = params.username {
            active.username = ActiveValue::Set(username);
        }
        if let Some(email) = params.email {
            active.email = ActiveValue::Set(email);
        }
        if let Some(full_name) = params.full_name {
            active.full_name = ActiveValue::Set(full_name);
        }
        if let Some(role) = params.role {
            active.role = ActiveValue::Set(role);
        }
        if let Some(phone) = params.phone {
            active.phone = ActiveValue::Set(Some(phone));
        }
        if let Some(is_active) = params.is_active {
            active.is_active = ActiveValue::Set(is_active);
        }
        if let Some(hash) = password_hash {
            active.password_hash = ActiveValue::Set(hash);
        }
        active.updated_at = ActiveValue::Set(Utc::now());

        Ok(Some(User::from_entity(active.update(self.db).await?)))
    }

    /// Records a successful login.
    pub async fn touch_last_login(&self, id: i32) -> Result<(), DbErr> {
        let now = Utc::now();
        entity::prelude::User::update_many()
            .col_expr(
                entity::user::Column::LastLogin,
                sea_orm::sea_query::Expr::value(now),
            )
            .filter(entity::user::Column::Id.eq(id))
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Deletes a user.
    ///
    /// # Returns
    /// - `Ok(true)` - User deleted
    /// - `Ok(false)` - No user with that id
    /// - `Err(DbErr)` - Database error, including foreign key violations when the user
    ///   still owns requests or other records
    pub async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::User::delete_by_id(id).exec(self.db).await?;

        Ok(result.rows_affected > 0)
    }

    pub async fn count(&self) -> Result<u64, DbErr> {
        entity::prelude::User::find().count(self.db).await
    }

    /// Gets the ids of active users holding any of the given roles.
    pub async fn active_ids_with_roles(&self, roles: &[UserRole]) -> Result<Vec<i32>, DbErr> {
        entity::prelude::User::find()
            .select_only()
            .column(entity::user::Column::Id)
            .filter(entity::user::Column::Role.is_in(roles.iter().copied()))
            .filter(entity::user::Column::IsActive.eq(true))
            .into_tuple()
            .all(self.db)
            .await
    }
}
