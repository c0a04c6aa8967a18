//! Bearer token authentication and role based authorization.
//!
//! Handlers extract a `BearerToken` and hand it to `AuthGuard::require` together with the
//! permissions the operation needs. The guard verifies the token, reloads the user and
//! checks the user's role against every requested permission.

use std::convert::Infallible;

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use sea_orm::DatabaseConnection;

use crate::server::{
    data::user::UserRepository,
    error::{auth::AuthError, AppError},
    model::user::User,
    util::jwt::JwtKeys,
};
use entity::enums::UserRole;

/// Raw bearer token taken from the `Authorization` header.
///
/// Extraction never fails. Missing and malformed headers are carried as variants so the
/// guard can answer with the matching error message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BearerToken {
    Missing,
    Malformed,
    Present(String),
}

impl BearerToken {
    /// Parses an `Authorization` header value.
    pub fn parse(header: Option<&str>) -> Self {
        let Some(header) = header else {
            return Self::Missing;
        };

        match header.split_once(' ') {
            Some((scheme, token)) if scheme == "Bearer" && !token.trim().is_empty() => {
                Self::Present(token.trim().to_string())
            }
            _ => Self::Malformed,
        }
    }
}

impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = parts.headers.get(AUTHORIZATION).map(|value| value.to_str());

        Ok(match header {
            None => Self::Missing,
            Some(Ok(value)) => Self::parse(Some(value)),
            Some(Err(_)) => Self::Malformed,
        })
    }
}

/// Operations grouped by the roles allowed to perform them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    /// User, role and employee administration, and any other admin-only operation.
    Admin,
    /// Stock changes, deliveries, inventory items and reserves.
    ManageStock,
    /// Engineering views such as editing requests, files and project statistics.
    Engineering,
    /// Raising new material requests.
    RaiseRequest,
    /// Request status distribution reports.
    ViewReports,
}

impl Permission {
    pub fn allowed_roles(&self) -> &'static [UserRole] {
        match self {
            Self::Admin => &[UserRole::Admin],
            Self::ManageStock => &[UserRole::Admin, UserRole::Warehouse],
            Self::Engineering => &[UserRole::Admin, UserRole::Engineer],
            Self::RaiseRequest => &[UserRole::Admin, UserRole::Engineer, UserRole::Contractor],
            Self::ViewReports => &[UserRole::Admin, UserRole::Engineer, UserRole::Warehouse],
        }
    }

    pub fn allows(&self, role: UserRole) -> bool {
        self.allowed_roles().contains(&role)
    }
}

pub struct AuthGuard<'a> {
    db: &'a DatabaseConnection,
    jwt: &'a JwtKeys,
    token: &'a BearerToken,
}

impl<'a> AuthGuard<'a> {
    pub fn new(db: &'a DatabaseConnection, jwt: &'a JwtKeys, token: &'a BearerToken) -> Self {
        Self { db, jwt, token }
    }

    /// Authenticates the caller and checks every permission in `permissions`.
    ///
    /// An empty slice accepts any authenticated, active user.
    ///
    /// # Returns
    /// - `Ok(User)` - The authenticated user
    /// - `Err(AppError::AuthErr)` - 401 for token problems or unknown users, 403 when a
    ///   permission is not granted to the user's role
    /// - `Err(AppError::DbErr)` - Database error while loading the user
    pub async fn require(&self, permissions: &[Permission]) -> Result<User, AppError> {
        let token = match self.token {
            BearerToken::Missing => return Err(AuthError::MissingToken.into()),
            BearerToken::Malformed => return Err(AuthError::InvalidTokenFormat.into()),
            BearerToken::Present(token) => token,
        };

        let claims = self.jwt.verify(token)?;

        let user = UserRepository::new(self.db)
            .find_by_id(claims.sub)
            .await?
            .filter(|user| user.is_active)
            .ok_or(AuthError::UserNotFound(claims.sub))?;

        if permissions.iter().any(|p| !p.allows(user.role)) {
            return Err(AuthError::InsufficientPermissions(user.id).into());
        }

        Ok(user)
    }
}
