use sea_orm::DatabaseConnection;

use crate::server::{
    data::user::UserRepository,
    error::AppError,
    model::{
        pagination::{Paginated, Pagination},
        user::{CreateUserParams, NewUser, UpdateUserParams, User},
    },
    util::{password, validation::Validator},
};

pub const MIN_USERNAME_LEN: usize = 3;
pub const MIN_PASSWORD_LEN: usize = 6;

/// Validates the fields of a new account, shared by registration and admin creation.
pub(crate) fn validate_new_user(user: &NewUser) -> Result<(), AppError> {
    Validator::new()
        .min_len(&user.username, MIN_USERNAME_LEN, "username")
        .email(&user.email, "email")
        .min_len(&user.password, MIN_PASSWORD_LEN, "password")
        .not_blank(&user.full_name, "full_name")
        .finish()
}

pub struct UserService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get_paginated(
        &self,
        search: Option<&str>,
        pagination: Pagination,
    ) -> Result<Paginated<User>, AppError> {
        let (users, total) = UserRepository::new(self.db)
            .get_paginated(search, pagination)
            .await?;

        Ok(Paginated::new(users, total, pagination))
    }

    pub async fn get_by_id(&self, id: i32) -> Result<User, AppError> {
        UserRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    /// Creates an account with a hashed password.
    ///
    /// # Returns
    /// - `Ok(User)` - The created user
    /// - `Err(AppError::Validation)` - A field failed validation
    /// - `Err(AppError::BadRequest)` - Username or email already in use
    pub async fn create(&self, new_user: NewUser) -> Result<User, AppError> {
        validate_new_user(&new_user)?;

        let repo = UserRepository::new(self.db);
        if repo
            .identity_taken(Some(&new_user.username), Some(&new_user.email), None)
            .await?
        {
            return Err(AppError::BadRequest(
                "Username or email already exists".to_string(),
            ));
        }

        let password_hash = password::hash(&new_user.password)?;

        let user = repo
            .create(CreateUserParams {
                username: new_user.username,
                email: new_user.email,
                password_hash,
                full_name: new_user.full_name,
                role: new_user.role,
                phone: new_user.phone,
                is_active: new_user.is_active,
            })
            .await?;

        Ok(user)
    }

    /// Applies a partial update. A new password is validated and re-hashed.
    pub async fn update(&self, id: i32, params: UpdateUserParams) -> Result<User, AppError> {
        let mut validator = Validator::new();
        if let Some(username) = &params.username {
            validator.min_len(username, MIN_USERNAME_LEN, "username");
        }
        if let Some(email) = &params.email {
            validator.email(email, "email");
        }
        if let Some(password) = &params.password {
            validator.min_len(password, MIN_PASSWORD_LEN, "password");
        }
        if let Some(full_name) = &params.full_name {
            validator.not_blank(full_name, "full_name");
        }
        validator.finish()?;

        let repo = UserRepository::new(self.db);
        if repo
            .identity_taken(params.username.as_deref(), params.email.as_deref(), Some(id))
            .await?
        {
            return Err(AppError::BadRequest(
                "Username or email already exists".to_string(),
            ));
        }

        let password_hash = params
            .password
            .as_deref()
            .map(password::hash)
            .transpose()?;

        repo.update(id, params, password_hash)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    /// Deletes a user. Admins cannot delete their own account.
    pub async fn delete(&self, actor_id: i32, id: i32) -> Result<(), AppError> {
        if actor_id == id {
            return Err(AppError::BadRequest(
                "You cannot delete your own account".to_string(),
            ));
        }

        if !UserRepository::new(self.db).delete(id).await? {
            return Err(AppError::NotFound("User not found".to_string()));
        }

        Ok(())
    }
}
