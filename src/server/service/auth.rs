//! Account registration, login and password changes.

use sea_orm::DatabaseConnection;

use crate::server::{
    data::user::UserRepository,
    error::{auth::AuthError, AppError},
    model::user::{NewUser, UpdateUserParams, User},
    service::user::{UserService, MIN_PASSWORD_LEN},
    util::{jwt::JwtKeys, password, validation::Validator},
};

pub struct AuthService<'a> {
    db: &'a DatabaseConnection,
    jwt: &'a JwtKeys,
}

impl<'a> AuthService<'a> {
    pub fn new(db: &'a DatabaseConnection, jwt: &'a JwtKeys) -> Self {
        Self { db, jwt }
    }

    /// Registers a new account and signs the user in.
    ///
    /// # Returns
    /// - `Ok((User, String))` - The new user and a bearer token
    /// - `Err(AppError::Validation)` - A field failed validation
    /// - `Err(AppError::BadRequest)` - Username or email already in use
    pub async fn register(&self, new_user: NewUser) -> Result<(User, String), AppError> {
        let user = UserService::new(self.db).create(new_user).await?;
        let token = self.jwt.issue(user.id, user.role)?;

        tracing::info!("Registered user {} ({:?})", user.username, user.role);

        Ok((user, token))
    }

    /// Verifies credentials and issues a token.
    ///
    /// Unknown usernames, inactive accounts and wrong passwords all fail the same way so
    /// the response does not reveal which accounts exist.
    ///
    /// # Returns
    /// - `Ok((User, String))` - The user with `last_login` updated and a bearer token
    /// - `Err(AppError::AuthErr)` - Invalid credentials
    pub async fn login(&self, username: &str, password: &str) -> Result<(User, String), AppError> {
        let repo = UserRepository::new(self.db);

        let Some((user, hash)) = repo.find_credentials_by_username(username).await? else {
            return Err(AuthError::InvalidCredentials.into());
        };

        if !user.is_active || !password::verify(password, &hash) {
            return Err(AuthError::InvalidCredentials.into());
        }

        repo.touch_last_login(user.id).await?;
        let user = repo.find_by_id(user.id).await?.unwrap_or(user);
        let token = self.jwt.issue(user.id, user.role)?;

        tracing::debug!("User {} logged in", user.username);

        Ok((user, token))
    }

    /// Replaces the caller's password after checking the current one.
    pub async fn change_password(
        &self,
        user_id: i32,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), AppError> {
        Validator::new()
            .min_len(new_password, MIN_PASSWORD_LEN, "new_password")
            .finish()?;

        let repo = UserRepository::new(self.db);
        let hash = repo
            .find_password_hash(user_id)
            .await?
            .ok_or(AuthError::UserNotFound(user_id))?;

        if !password::verify(current_password, &hash) {
            return Err(AuthError::IncorrectPassword.into());
        }

        let new_hash = password::hash(new_password)?;
        repo.update(user_id, UpdateUserParams::default(), Some(new_hash))
            .await?
            .ok_or(AuthError::UserNotFound(user_id))?;

        Ok(())
    }
}
